//! Counts up on a 4-digit, 7-segment display wired to a Raspberry Pi Pico.
//!
//! Cathodes on GPIO 1-4 (low = lit), segments A-G and the decimal point on GPIO 5-12.
//! One task advances the count; the main task owns the multiplex cadence.
#![no_std]
#![no_main]

use defmt::{info, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Duration, Ticker, Timer};
use panic_probe as _;
use portable_atomic::{AtomicU16, Ordering};
use seg7_mux::{OutputArray, PinMap, Polarity, Port, Scanner};

/// Time between refreshes. Four digits at 625 µs each give a 400 Hz frame rate.
const MULTIPLEX_PERIOD: Duration = Duration::from_micros(625);

const COUNT_PERIOD: Duration = Duration::from_millis(100);

static COUNT: AtomicU16 = AtomicU16::new(0);

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    // Listed in `PinMap::sequential` order: segments, decimal point, then digits.
    let outputs = OutputArray::new(
        Port::A,
        [
            Output::new(p.PIN_5, Level::Low),  // Segment A
            Output::new(p.PIN_6, Level::Low),  // Segment B
            Output::new(p.PIN_7, Level::Low),  // Segment C
            Output::new(p.PIN_8, Level::Low),  // Segment D
            Output::new(p.PIN_9, Level::Low),  // Segment E
            Output::new(p.PIN_10, Level::Low), // Segment F
            Output::new(p.PIN_11, Level::Low), // Segment G
            Output::new(p.PIN_12, Level::Low), // Decimal point
            Output::new(p.PIN_1, Level::High), // Digit 1
            Output::new(p.PIN_2, Level::High), // Digit 2
            Output::new(p.PIN_3, Level::High), // Digit 3
            Output::new(p.PIN_4, Level::High), // Digit 4
        ],
    );
    let pin_map = PinMap::sequential(Port::A).with_polarity(Polarity::COMMON_CATHODE);
    let mut scanner = Scanner::new(outputs, pin_map);
    unwrap!(scanner.init());

    spawner.spawn(unwrap!(count_task(&COUNT)));

    info!("Multiplexing every {} us", MULTIPLEX_PERIOD.as_micros());
    let mut ticker = Ticker::every(MULTIPLEX_PERIOD);
    loop {
        scanner.refresh(COUNT.load(Ordering::Relaxed));
        ticker.next().await;
    }
}

#[embassy_executor::task]
async fn count_task(count: &'static AtomicU16) -> ! {
    loop {
        Timer::after(COUNT_PERIOD).await;
        // Wraps at 65535; the display shows the low four digits.
        let previous = count.fetch_add(1, Ordering::Relaxed);
        if previous % 100 == 0 {
            info!("count: {}", previous);
        }
    }
}
