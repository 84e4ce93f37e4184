use candle_core::Device;
use tracing::{debug, warn};

/// Picks the inference device: Metal, then CUDA (when compiled in), else CPU.
///
/// GPU initialisation failures are logged and fall through to the next option.
pub fn select_device() -> Device {
    #[cfg(any(feature = "metal", feature = "cuda"))]
    let mut attempts: Vec<String> = Vec::new();

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    let attempts: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            tracing::info!("Sentence encoder using Metal");
            return device;
        }
        Err(e) => {
            warn!(error = %e, "Metal device unavailable");
            attempts.push(format!("metal: {e}"));
        }
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            tracing::info!("Sentence encoder using CUDA");
            return device;
        }
        Err(e) => {
            warn!(error = %e, "CUDA device unavailable");
            attempts.push(format!("cuda: {e}"));
        }
    }

    if attempts.is_empty() {
        debug!("No GPU backend compiled, using CPU");
    } else {
        warn!(attempts = %attempts.join("; "), "Falling back to CPU device");
    }

    Device::Cpu
}
