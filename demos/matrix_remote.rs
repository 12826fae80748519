#![no_std]
#![no_main]

//! Matrix remote firmware: an RC5 remote picks a mode and steers a dot on the 16×16 matrix.
//!
//! Wiring: IR receiver on GPIO 7, first matrix half on GPIO 9, second half on GPIO 10.

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_time::{Duration, Instant, Timer};
use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, PrimitiveStyle},
};
use ir_matrix::{
    Result,
    config::{
        CHANNEL_ORDER, CPU_HZ, FIRST_LINE_PIN, MATRIX_HEIGHT, MATRIX_LAYOUT, MATRIX_LEN,
        MATRIX_WIDTH, RC5_PIN, RC5_TICK_HZ, RC5_TIMING, SECOND_LINE_PIN, WS2812_TIMING,
    },
    matrix::{Matrix, RGB8, colors},
    rc5::{Rc5Isr, Rc5Mailbox, Rc5Receiver, systick},
    remote::RemoteButton,
    ws2812::{BitEmitter, rp2040::SioEmitter},
};
use {defmt_rtt as _, panic_probe as _};

static RC5_MAILBOX: Rc5Mailbox = Rc5Mailbox::new();
static RC5_ISR: Rc5Isr<Input<'static>> = Rc5Isr::new();

#[allow(unsafe_code, reason = "the exception attribute exports the handler symbol")]
#[cortex_m_rt::exception]
fn SysTick() {
    RC5_ISR.on_tick();
}

/// How often the dot moves in snake and tetris.
const STEP: Duration = Duration::from_millis(250);

/// How often the mailbox is polled.
const POLL: Duration = Duration::from_millis(20);

#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
enum Mode {
    Smiley,
    Snake,
    Tetris,
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let err = inner_main().await.unwrap_err();
    panic!("{err}");
}

async fn inner_main() -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    let mut core = cortex_m::Peripherals::take().expect("core peripherals are taken once");

    defmt::info!(
        "ir-matrix: {} Hz core, RC5 tick {} Hz ({})",
        CPU_HZ,
        RC5_TICK_HZ,
        RC5_TIMING
    );
    if WS2812_TIMING.is_marginal() {
        defmt::warn!(
            "WS2812 zero pulse is {} ns, close to the limit",
            WS2812_TIMING.zero_high_ns
        );
    }

    // The board wiring in `config` must match the peripherals claimed here.
    defmt::assert_eq!(p.PIN_7.pin(), RC5_PIN);
    defmt::assert_eq!(p.PIN_9.pin(), FIRST_LINE_PIN);
    defmt::assert_eq!(p.PIN_10.pin(), SECOND_LINE_PIN);

    let ir_pin = Input::new(p.PIN_7, Pull::Up);
    RC5_ISR.install(Rc5Receiver::new(ir_pin, RC5_TIMING, &RC5_MAILBOX))?;
    systick::start(&mut core.SYST);

    let mut matrix = Matrix::new(
        SioEmitter::new(p.PIN_9, p.PIN_10),
        &MATRIX_LAYOUT,
        CHANNEL_ORDER,
    );

    let mut mode = Mode::Smiley;
    let mut dot = Point::new(MATRIX_WIDTH as i32 / 2, MATRIX_HEIGHT as i32 / 2);
    let mut heading = (1, 0);
    let mut next_step = Instant::now();
    draw(&mut matrix, mode, dot);
    defmt::info!("mode: {}", mode);

    loop {
        if let Some(code) = RC5_MAILBOX.take() {
            defmt::info!("KEY: {}", code);
            let previous = mode;
            match RemoteButton::from_command(code) {
                Some(RemoteButton::Smiley) => mode = Mode::Smiley,
                Some(RemoteButton::Snake) => mode = Mode::Snake,
                Some(RemoteButton::Tetris) => {
                    mode = Mode::Tetris;
                    dot = Point::new(dot.x, 0);
                }
                Some(button) => match (mode, button.direction()) {
                    (Mode::Snake, Some(direction)) => heading = direction,
                    // Blocks only shift sideways or drop.
                    (Mode::Tetris, Some(direction)) if direction.1 >= 0 => {
                        dot = advance(dot, direction);
                    }
                    _ => {}
                },
                None => {}
            }
            if mode != previous {
                defmt::info!("mode: {}", mode);
            }
            draw(&mut matrix, mode, dot);
        }

        if mode != Mode::Smiley && Instant::now() >= next_step {
            next_step = Instant::now() + STEP;
            dot = match mode {
                Mode::Snake => advance(dot, heading),
                Mode::Tetris if dot.y >= MATRIX_HEIGHT as i32 - 1 => Point::new(dot.x, 0),
                _ => advance(dot, (0, 1)),
            };
            draw(&mut matrix, mode, dot);
        }

        Timer::after(POLL).await;
    }
}

/// Move one step, wrapping around the matrix edges.
fn advance(dot: Point, (dx, dy): (i32, i32)) -> Point {
    Point::new(
        (dot.x + dx).rem_euclid(MATRIX_WIDTH as i32),
        (dot.y + dy).rem_euclid(MATRIX_HEIGHT as i32),
    )
}

fn draw<E: BitEmitter>(
    matrix: &mut Matrix<E, MATRIX_LEN, MATRIX_WIDTH, MATRIX_HEIGHT>,
    mode: Mode,
    dot: Point,
) {
    matrix.clear(colors::BLACK);
    match mode {
        Mode::Smiley => {
            let style = PrimitiveStyle::with_stroke(Rgb888::YELLOW, 1);
            Circle::new(Point::new(1, 1), 14)
                .into_styled(style)
                .draw(matrix)
                .unwrap_or_else(|never| match never {});
            for (x, y) in [(5, 5), (10, 5)] {
                matrix.set(x, y, colors::YELLOW);
            }
            for x in 5..=10 {
                matrix.set(x, if x == 5 || x == 10 { 9 } else { 10 }, colors::YELLOW);
            }
        }
        Mode::Snake => matrix.set(dot.x, dot.y, colors::LIME),
        Mode::Tetris => {
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                matrix.set(dot.x + dx, dot.y + dy, RGB8::new(0, 64, 255));
            }
        }
    }
    matrix.flush();
}
