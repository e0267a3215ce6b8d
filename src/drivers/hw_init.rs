//! One-shot hardware peripheral initialization.
//!
//! Configures the two anemometer contacts as pulled-up, falling-edge GPIO
//! inputs, registers their ISRs, and sets up the heartbeat LED output,
//! using raw ESP-IDF sys calls.  Called
//! once from `main()` before the cycle driver starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrHandlerFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrHandlerFailed(rc) => write!(f, "GPIO ISR handler add failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

impl From<HwInitError> for crate::error::Error {
    fn from(_: HwInitError) -> Self {
        Self::Init("anemometer inputs")
    }
}

// ── GPIO Inputs ───────────────────────────────────────────────

/// Reed contacts to ground: input, internal pull-up, falling-edge interrupt.
#[cfg(target_os = "espidf")]
pub fn init_pulse_inputs() -> Result<(), HwInitError> {
    for pin in [pins::SPEED_PULSE_GPIO, pins::DIRECTION_PULSE_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
        };
        // SAFETY: Called once from main() before the ISRs are registered.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!(
        "hw_init: pulse inputs configured (speed=GPIO{}, direction=GPIO{})",
        pins::SPEED_PULSE_GPIO,
        pins::DIRECTION_PULSE_GPIO
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_pulse_inputs() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): pulse input config skipped");
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_heartbeat_output() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::HEARTBEAT_LED_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: Called once from main() before the cycle driver starts.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    // SAFETY: The pin was configured as an output just above; nothing else
    // drives it yet.
    unsafe { gpio_set_level(pins::HEARTBEAT_LED_GPIO, 0) };

    info!("hw_init: heartbeat LED on GPIO{}", pins::HEARTBEAT_LED_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_heartbeat_output() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): heartbeat output skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    // Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::adapters::time::now_us;
#[cfg(target_os = "espidf")]
use crate::drivers::isr_pin::IsrPin;
#[cfg(target_os = "espidf")]
use crate::sensors::PULSE_CAPTURE;

#[cfg(target_os = "espidf")]
unsafe extern "C" fn speed_gpio_isr(_arg: *mut core::ffi::c_void) {
    let now = now_us();
    PULSE_CAPTURE.on_speed_edge(&mut IsrPin::new(pins::SPEED_PULSE_GPIO), now);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn direction_gpio_isr(_arg: *mut core::ffi::c_void) {
    let now = now_us();
    PULSE_CAPTURE.on_direction_edge(&mut IsrPin::new(pins::DIRECTION_PULSE_GPIO), now);
}

/// Install per-pin GPIO ISR service and register both pulse handlers.
/// Call after [`init_pulse_inputs`] and before the cycle driver runs.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handlers are static
    // functions touching only PULSE_CAPTURE under its critical section.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        let handlers: [(i32, unsafe extern "C" fn(*mut core::ffi::c_void)); 2] = [
            (pins::SPEED_PULSE_GPIO, speed_gpio_isr),
            (pins::DIRECTION_PULSE_GPIO, direction_gpio_isr),
        ];
        for (pin, isr) in handlers {
            let ret = gpio_isr_handler_add(pin, Some(isr), core::ptr::null_mut());
            if ret != ESP_OK as i32 {
                return Err(HwInitError::IsrHandlerFailed(ret));
            }
            gpio_intr_enable(pin);
        }
    }

    info!("hw_init: ISR service installed (speed, direction)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
