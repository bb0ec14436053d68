//! Firmware for the laser toy on a Pico 1.
//!
//! Build with `--no-default-features --features embedded --target thumbv6m-none-eabi`.
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::clocks::RoscRng;
use laser_toy::{LaserToy, Result, ToyConfig, button::PressedTo, hardware::PicoBoard};
use rand::{RngCore, SeedableRng, rngs::SmallRng};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // The ring oscillator jitters enough to seed a fresh sweep pattern every boot.
    let seed = RoscRng.next_u64();
    info!("sweep seed {=u64:x}", seed);

    let board = PicoBoard::new(p, PressedTo::Ground)?;
    let mut toy = LaserToy::new(board, SmallRng::seed_from_u64(seed), ToyConfig::new())?;
    toy.run().await
}
