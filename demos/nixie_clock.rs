//! A six-tube nixie clock on a Raspberry Pi Pico.
//!
//! Wiring (HV5622 driver chain):
//! - GPIO0: latch enable
//! - GPIO2: blank, held high
//! - GPIO12: serial data
//! - GPIO13: serial clock
//! - GPIO14: high-voltage supply enable
//! - GPIO10: WS2812 backlight ring data (PIO0)
//!
//! The clock starts at `NIXIE_START_TIME` and free-runs from the Pico's timer. Dot
//! behaviour and the slot-machine trigger come from `NIXIE_DOTS` and
//! `NIXIE_SLOT_MACHINE`, the backlight from `NIXIE_LED_EFFECT` and
//! `NIXIE_LED_BRIGHTNESS` (see `build.rs`).
//!
//! Between seconds the loop sleeps until the displayed second changes. While the reels
//! spin, or the backlight moves, it wakes often enough to draw every step.

#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "single-threaded")]

use core::convert::Infallible;
use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_time::{Duration, Instant, Timer};
use nixie_kit::{
    BitBangShiftRegister, ClockConfig, ClockTime, HvSupply, LED_COUNT, LedRing, LedRingConfig,
    NixieClock, Result, STEP_DURATION,
};
use panic_probe as _;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// Several ticks per animation step so no step is skipped.
const TICK_PERIOD: Duration = Duration::from_millis(10);

#[embassy_executor::main]
pub async fn main(_spawner: Spawner) -> ! {
    let err = inner_main().await.unwrap_err();
    core::panic!("{err}");
}

async fn inner_main() -> Result<Infallible> {
    info!("Starting nixie clock");
    let p = embassy_rp::init(Default::default());

    // The enable line goes low before anything else so the tubes stay dark.
    let mut hv_supply = HvSupply::new(Output::new(p.PIN_14, Level::Low))?;
    // Blanking is handled by the frame; keep the driver's BL input inactive.
    let _blank = Output::new(p.PIN_2, Level::High);

    let register = BitBangShiftRegister::new(
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
        Output::new(p.PIN_0, Level::Low),
    );

    let config = ClockConfig::from_build_env()?;
    info!("Config: {:?}", config);
    let mut clock = NixieClock::new(register, config);
    clock.begin()?;
    hv_supply.switch_on()?;

    let clock_time = ClockTime::new(config.start_time, Instant::now());
    info!(
        "Tick every {} ms, animation step {} ms",
        TICK_PERIOD.as_millis(),
        STEP_DURATION.as_millis()
    );

    let ring_config = LedRingConfig::from_build_env()?;
    info!("LED ring: {:?}", ring_config);
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let mut ring_driver: PioWs2812<'_, PIO0, 0, LED_COUNT> =
        PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_10, &program);
    let mut ring = LedRing::new(ring_config.effect, ring_config.brightness);

    loop {
        let now = Instant::now();
        clock.tick(now, clock_time.time_of_day(now))?;
        if ring.update(now) {
            ring_driver.write(&ring.pixels()).await;
        }

        let wait = if clock.is_animating() {
            TICK_PERIOD
        } else {
            let next_second = clock_time.until_next_second(now);
            ring.until_next_step(now)
                .map_or(next_second, |step| step.min(next_second))
        };
        Timer::after(wait).await;
    }
}
