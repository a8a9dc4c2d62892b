// src/exec/control.rs

use tokio::sync::watch;

/// Signal from the controller to the session worker.
///
/// `Stop` is sticky: once set, pause and resume no longer change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlSignal {
    #[default]
    Run,
    Pause,
    Stop,
}

/// Request a pause. Returns `true` if the signal changed.
pub fn request_pause(tx: &watch::Sender<ControlSignal>) -> bool {
    tx.send_if_modified(|signal| {
        if *signal == ControlSignal::Run {
            *signal = ControlSignal::Pause;
            true
        } else {
            false
        }
    })
}

/// Lift a pause. Returns `true` if the signal changed.
pub fn request_resume(tx: &watch::Sender<ControlSignal>) -> bool {
    tx.send_if_modified(|signal| {
        if *signal == ControlSignal::Pause {
            *signal = ControlSignal::Run;
            true
        } else {
            false
        }
    })
}

/// Request a stop. Returns `true` if the signal changed.
pub fn request_stop(tx: &watch::Sender<ControlSignal>) -> bool {
    tx.send_if_modified(|signal| {
        if *signal == ControlSignal::Stop {
            false
        } else {
            *signal = ControlSignal::Stop;
            true
        }
    })
}
