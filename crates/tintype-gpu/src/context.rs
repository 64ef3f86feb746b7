//! Adapter and device acquisition.

use crate::error::EngineError;

/// Adapter selection preferences.
#[derive(Debug, Clone)]
pub struct GpuConfig {
    /// Preferred adapter class.
    pub power_preference: wgpu::PowerPreference,
    /// Accept only a software/fallback adapter.
    pub force_fallback_adapter: bool,
    /// Backends the instance may use.
    pub backends: wgpu::Backends,
}

impl Default for GpuConfig {
    /// Reads `TINTYPE_POWER`, `TINTYPE_FALLBACK_ADAPTER` and `WGPU_BACKEND`.
    fn default() -> Self {
        let power_preference = match std::env::var("TINTYPE_POWER").ok().as_deref() {
            Some("low") => wgpu::PowerPreference::LowPower,
            Some("high") => wgpu::PowerPreference::HighPerformance,
            _ => wgpu::PowerPreference::default(),
        };
        Self {
            power_preference,
            force_fallback_adapter: std::env::var("TINTYPE_FALLBACK_ADAPTER").is_ok(),
            backends: wgpu::Backends::from_env().unwrap_or(wgpu::Backends::all()),
        }
    }
}

/// Owned device and queue plus the adapter description for diagnostics.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_info: Option<wgpu::AdapterInfo>,
}

impl GpuContext {
    /// Request a headless adapter and device. Blocks until both are ready.
    pub fn new(config: &GpuConfig) -> Result<Self, EngineError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: config.power_preference,
            force_fallback_adapter: config.force_fallback_adapter,
            compatible_surface: None,
        }))
        .map_err(|e| EngineError::Initialization(format!("no compatible adapter: {e}")))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("tintype_device"),
            required_features: wgpu::Features::empty(),
            required_limits: adapter.limits(),
            ..Default::default()
        }))
        .map_err(|e| EngineError::Initialization(format!("device request failed: {e}")))?;

        let info = adapter.get_info();
        tracing::info!(
            adapter = %info.name,
            backend = ?info.backend,
            driver = %info.driver,
            "GPU device ready"
        );

        Ok(Self {
            device,
            queue,
            adapter_info: Some(info),
        })
    }

    /// Wrap an existing device and queue (e.g. shared with a host renderer).
    pub fn from_device(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            adapter_info: None,
        }
    }

    /// Block until all submitted work has finished.
    ///
    /// A poll failure means the device is gone, which is fatal.
    pub fn wait_idle(&self) -> Result<(), EngineError> {
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map(|_| ())
            .map_err(|e| EngineError::Initialization(format!("device lost: {e}")))
    }
}
