//! Remote buttons and the key codes they send.
//!
//! The codes are the 7-bit values [`Rc5Mailbox::take`](crate::rc5::Rc5Mailbox::take)
//! returns for the matrix's remote:
//!
//! ```text
//!   [1] smiley    [2]  ^     [3] snake
//!   [4]  <                   [6]  >
//!   [7] tetris    [8]  v
//! ```

/// A button on the matrix remote.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RemoteButton {
    /// Switch to the smiley (brightness) display.
    Smiley = 1,
    /// Switch to snake.
    Snake = 3,
    /// Switch to tetris.
    Tetris = 7,
    /// Direction up.
    Up = 2,
    /// Direction right.
    Right = 6,
    /// Direction down.
    Down = 8,
    /// Direction left.
    Left = 4,
}

impl RemoteButton {
    /// The button that sends `code`, or `None` for keys the matrix does not use.
    ///
    /// ```rust
    /// use ir_matrix::remote::RemoteButton;
    ///
    /// assert_eq!(RemoteButton::from_command(3), Some(RemoteButton::Snake));
    /// assert_eq!(RemoteButton::from_command(5), None);
    /// ```
    #[must_use]
    pub const fn from_command(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::Smiley,
            2 => Self::Up,
            3 => Self::Snake,
            4 => Self::Left,
            6 => Self::Right,
            7 => Self::Tetris,
            8 => Self::Down,
            _ => return None,
        })
    }

    /// The key code this button sends.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The `(dx, dy)` step for a direction button, with `y` growing downward.
    #[must_use]
    pub const fn direction(self) -> Option<(i32, i32)> {
        match self {
            Self::Up => Some((0, -1)),
            Self::Right => Some((1, 0)),
            Self::Down => Some((0, 1)),
            Self::Left => Some((-1, 0)),
            Self::Smiley | Self::Snake | Self::Tetris => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(1, RemoteButton::Smiley ; "smiley")]
    #[test_case(3, RemoteButton::Snake ; "snake")]
    #[test_case(7, RemoteButton::Tetris ; "tetris")]
    #[test_case(2, RemoteButton::Up ; "up")]
    #[test_case(6, RemoteButton::Right ; "right")]
    #[test_case(8, RemoteButton::Down ; "down")]
    #[test_case(4, RemoteButton::Left ; "left")]
    fn known_codes(code: u8, button: RemoteButton) {
        assert_eq!(RemoteButton::from_command(code), Some(button));
        assert_eq!(button.code(), code);
    }

    #[test]
    fn unused_codes_map_to_none() {
        for code in [0, 5, 9, 63, 64, 127] {
            assert_eq!(RemoteButton::from_command(code), None);
        }
    }

    #[test]
    fn only_arrows_have_a_direction() {
        assert_eq!(RemoteButton::Left.direction(), Some((-1, 0)));
        assert_eq!(RemoteButton::Tetris.direction(), None);
    }
}
