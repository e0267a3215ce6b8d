//! Wind instrument firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  GPIO ISRs (speed, direction) ──▶ PULSE_CAPTURE (static)  │
//! │                                        │ snapshot         │
//! │  ─────────────── Port Trait Boundary ──┼──────────────    │
//! │                                        ▼                  │
//! │  Esp32TimeAdapter ──▶ CycleDriver ──▶ Heartbeat(Serial)   │
//! │   (TimePort)          (conditioning)   (OutputPort)       │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use windvane::adapters::serial::SerialOutput;
use windvane::adapters::time::Esp32TimeAdapter;
use windvane::app::driver::CycleDriver;
use windvane::config::SensorConfig;
use windvane::drivers::heartbeat::Heartbeat;
use windvane::drivers::hw_init;
use windvane::sensors::PULSE_CAPTURE;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Windvane v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SensorConfig::DEFAULT;
    config.validate()?;
    info!(
        "Config: debounce={}us timeout={}us offset={}deg gain={}/1000 emit={}ms mode={:?}",
        config.debounce_us,
        config.pulse_timeout_us,
        config.direction_offset_deg,
        config.filter_gain_permille,
        config.emit_interval_ms,
        config.output_mode,
    );

    // ── 3. Pulse inputs, ISRs, heartbeat ────────────────────────────────
    hw_init::init_pulse_inputs()?;
    hw_init::init_isr_service()?;
    hw_init::init_heartbeat_output()?;

    // ── 4. Cycle driver (never returns) ───────────────────────
    let clock = Esp32TimeAdapter::new();
    let output = Heartbeat::new(SerialOutput::new(std::io::stdout()));
    let mut driver = CycleDriver::new(&PULSE_CAPTURE, &config, clock, output);
    driver.run()
}
