use crate::error::{PipelineError, Result};
use candle_core::Device;

/// Compute device for the trained model. The lexicon fallback always runs on CPU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceRequest {
    #[default]
    Cpu,
    Cuda(usize),
}

impl DeviceRequest {
    pub fn resolve(self) -> Result<Device> {
        match self {
            DeviceRequest::Cpu => Ok(Device::Cpu),
            DeviceRequest::Cuda(i) => Device::new_cuda(i).map_err(|e| {
                PipelineError::Device(format!(
                    "Failed to init CUDA device {i}: {e}. Try CPU as fallback."
                ))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_always_resolves() {
        assert!(DeviceRequest::default().resolve().unwrap().is_cpu());
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn cuda_without_feature_is_a_device_error() {
        let err = DeviceRequest::Cuda(0).resolve().unwrap_err();
        assert!(matches!(err, PipelineError::Device(_)));
    }

    #[cfg(feature = "cuda")]
    #[test]
    fn cuda_resolves_to_gpu() {
        assert!(DeviceRequest::Cuda(0).resolve().unwrap().is_cuda());
    }
}
