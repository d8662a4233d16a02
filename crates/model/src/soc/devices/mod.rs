//! Memory-Mapped IO Devices.
//!
//! The control surface of the target: the simulation control page (terminate
//! doorbell, stimulus tags, and a signature stream), UART0 whose simulation
//! mode turns data writes into signature output, and the machine timer compare
//! pair used by the timer-clear stimulus.

/// Simulation control page (doorbell and signature stream).
pub mod sim_control;

/// Machine timer compare register pair.
pub mod timer;

/// UART0 control and data registers.
pub mod uart;

pub use sim_control::SimControl;
pub use timer::TimerCompare;
pub use uart::Uart;

pub use crate::soc::traits::Device;
