//! Compile-time wiring maps for LED matrices.
//!
//! See [`LedLayout`].

/// Which `(x, y)` cell each LED on the data line lights, checked at compile time.
///
/// Coordinates put `(0, 0)` at the top-left corner, `x` to the right and `y` downward.
/// Entry `i` of the map is the cell of the `i`th LED in wiring order.
///
/// Every layout is validated when it is built: each coordinate is in bounds and each
/// cell appears exactly once, so a layout is always a bijection between wiring order
/// and the `W`×`H` grid. Used in a `const`, a bad map fails the build.
///
/// Start from [`serpentine_column_major`](Self::serpentine_column_major) or
/// [`serpentine_row_major`](Self::serpentine_row_major) and adjust the scan direction
/// with [`flip_h`](Self::flip_h), [`flip_v`](Self::flip_v), or
/// [`rotate_cw`](Self::rotate_cw). Anything else can be listed by hand with
/// [`new`](Self::new).
///
/// # Example
///
/// A 3×2 panel whose strip snakes up the first column:
///
/// ```rust
/// use ir_matrix::matrix::layout::LedLayout;
///
/// const WIRING: LedLayout<6, 3, 2> = LedLayout::serpentine_column_major().flip_v();
/// const EXPECTED: LedLayout<6, 3, 2> =
///     LedLayout::new([(0, 1), (0, 0), (1, 0), (1, 1), (2, 1), (2, 0)]);
/// const _: () = assert!(WIRING.equals(&EXPECTED));
/// ```
///
/// ```text
///   LED1  LED2  LED5
///   LED0  LED3  LED4
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedLayout<const N: usize, const W: usize, const H: usize> {
    map: [(u16, u16); N],
}

impl<const N: usize, const W: usize, const H: usize> LedLayout<N, W, H> {
    /// Build a layout from `(x, y)` per LED in wiring order.
    ///
    /// Panics if `W * H != N`, a coordinate is out of bounds, or a cell repeats.
    ///
    /// ```rust
    /// use ir_matrix::matrix::layout::LedLayout;
    ///
    /// // Two rows, both wired left to right.
    /// const ROWS: LedLayout<4, 2, 2> = LedLayout::new([(0, 0), (1, 0), (0, 1), (1, 1)]);
    /// assert_eq!(ROWS.index_to_xy()[2], (0, 1));
    /// ```
    #[must_use]
    pub const fn new(map: [(u16, u16); N]) -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut seen = [false; N];
        let mut led = 0;
        while led < N {
            let (x, y) = map[led];
            let (x, y) = (x as usize, y as usize);
            assert!(x < W, "column out of bounds");
            assert!(y < H, "row out of bounds");

            let cell = y * W + x;
            assert!(!seen[cell], "duplicate (col,row) in mapping");
            seen[cell] = true;
            led += 1;
        }

        Self { map }
    }

    /// The `(x, y)` of every LED, in wiring order.
    #[must_use]
    pub const fn index_to_xy(&self) -> &[(u16, u16); N] {
        &self.map
    }

    /// The inverse map: entry `y * W + x` is the wiring index of that cell.
    #[must_use]
    pub(crate) const fn xy_to_index(&self) -> [u16; N] {
        assert!(N <= u16::MAX as usize, "matrix too large for u16 indices");

        // `new` proved the map is a bijection, so every cell is written once.
        let mut table = [0_u16; N];
        let mut led = 0;
        while led < N {
            let (x, y) = self.map[led];
            table[y as usize * W + x as usize] = led as u16;
            led += 1;
        }
        table
    }

    /// Whether both layouts put every LED on the same cell. Usable in `const` asserts.
    #[must_use]
    pub const fn equals(&self, other: &Self) -> bool {
        let mut led = 0;
        while led < N {
            if self.map[led].0 != other.map[led].0 || self.map[led].1 != other.map[led].1 {
                return false;
            }
            led += 1;
        }
        true
    }

    /// The strip runs down even columns and up odd columns, starting at the top-left.
    ///
    /// ```text
    /// 3×2:
    ///   LED0  LED3  LED4
    ///   LED1  LED2  LED5
    /// ```
    #[must_use]
    pub const fn serpentine_column_major() -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut map = [(0_u16, 0_u16); N];
        let mut x = 0;
        while x < W {
            let mut step = 0;
            while step < H {
                let y = if x % 2 == 0 { step } else { H - 1 - step };
                map[x * H + step] = (x as u16, y as u16);
                step += 1;
            }
            x += 1;
        }
        Self::new(map)
    }

    /// The strip runs right along even rows and left along odd rows, starting at the
    /// top-left.
    ///
    /// ```text
    /// 3×2:
    ///   LED0  LED1  LED2
    ///   LED5  LED4  LED3
    /// ```
    #[must_use]
    pub const fn serpentine_row_major() -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut map = [(0_u16, 0_u16); N];
        let mut y = 0;
        while y < H {
            let mut step = 0;
            while step < W {
                let x = if y % 2 == 0 { step } else { W - 1 - step };
                map[y * W + step] = (x as u16, y as u16);
                step += 1;
            }
            y += 1;
        }
        Self::new(map)
    }

    /// Mirror left to right.
    #[must_use]
    pub const fn flip_h(self) -> Self {
        let mut map = self.map;
        let mut led = 0;
        while led < N {
            map[led].0 = (W - 1 - map[led].0 as usize) as u16;
            led += 1;
        }
        Self::new(map)
    }

    /// Mirror top to bottom.
    #[must_use]
    pub const fn flip_v(self) -> Self {
        let mut map = self.map;
        let mut led = 0;
        while led < N {
            map[led].1 = (H - 1 - map[led].1 as usize) as u16;
            led += 1;
        }
        Self::new(map)
    }

    /// Turn the panel a quarter turn clockwise; width and height swap.
    ///
    /// ```text
    /// 3×2 serpentine   →   2×3:
    ///   LED0  LED3  LED4     LED1  LED0
    ///   LED1  LED2  LED5     LED2  LED3
    ///                        LED5  LED4
    /// ```
    #[must_use]
    pub const fn rotate_cw(self) -> LedLayout<N, H, W> {
        let mut map = [(0_u16, 0_u16); N];
        let mut led = 0;
        while led < N {
            let (x, y) = self.map[led];
            map[led] = ((H - 1 - y as usize) as u16, x);
            led += 1;
        }
        LedLayout::<N, H, W>::new(map)
    }
}
