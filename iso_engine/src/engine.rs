/// ISO Engine - Singleton manager for engine subsystems
///
/// Holds the process-wide logger and the editor's shared `ResourceManager`.
/// The resource manager has an explicit lifecycle: it is created at editor startup
/// from a graphics device and destroyed (after clearing its cache) at shutdown.
/// Nothing in `Scene` requires the singleton; tests build their own managers.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use crate::graphics_device::GraphicsDevice;
use crate::resource::ResourceManager;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Resource manager singleton
    resource_manager: RwLock<Option<Arc<Mutex<ResourceManager>>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            resource_manager: RwLock::new(None),
        }
    }
}

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())))
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// # Example
///
/// ```ignore
/// use iso_engine::iso::Engine;
///
/// Engine::initialize()?;
/// Engine::create_resource_manager(graphics_device)?;
///
/// let resources = Engine::resource_manager()?;
/// let scene = Scene::new(resources, importer);
///
/// Engine::shutdown();
/// ```
pub struct Engine;

impl Engine {
    /// Log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!("iso::Engine", "{}", error);
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get().ok_or_else(|| Self::log_and_return_error(
            Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
        ))
    }

    /// Initialize the engine
    ///
    /// Idempotent. Must be called before creating any subsystem.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the engine and destroy all singletons
    ///
    /// The resource cache is cleared before the manager is dropped so every GPU
    /// handle is released even if a scene still holds the `Arc`. Safe to call
    /// several times.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut rm) = state.resource_manager.write() {
                if let Some(manager) = rm.take() {
                    if let Ok(mut manager) = manager.lock() {
                        manager.clear();
                    }
                }
            }
        }
    }

    // ===== RESOURCE MANAGER API =====

    /// Create and register the resource manager singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A resource manager already exists
    pub fn create_resource_manager(
        graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    ) -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.resource_manager.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("ResourceManager lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("ResourceManager already exists. Call Engine::destroy_resource_manager() first.".to_string())
            ));
        }

        *lock = Some(Arc::new(Mutex::new(ResourceManager::new(graphics_device))));

        crate::engine_info!("iso::Engine", "ResourceManager singleton created successfully");

        Ok(())
    }

    /// Get the resource manager singleton
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized or the resource manager
    /// has not been created.
    pub fn resource_manager() -> Result<Arc<Mutex<ResourceManager>>> {
        let state = Self::state()?;

        let lock = state.resource_manager.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("ResourceManager lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("ResourceManager not created. Call Engine::create_resource_manager() first.".to_string())
            ))
    }

    /// Destroy the resource manager singleton
    ///
    /// Clears the cache (freeing every mesh and texture) and drops the singleton.
    /// Scenes still holding the manager keep a valid, now empty, cache.
    pub fn destroy_resource_manager() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.resource_manager.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("ResourceManager lock poisoned".to_string())
            ))?;

        if let Some(manager) = lock.take() {
            let mut manager = manager.lock()
                .map_err(|_| Self::log_and_return_error(
                    Error::BackendError("ResourceManager lock poisoned".to_string())
                ))?;
            manager.clear();
        }

        crate::engine_info!("iso::Engine", "ResourceManager singleton destroyed");

        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut rm) = state.resource_manager.write() {
                *rm = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Replace the current logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = self::logger().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to `DefaultLogger`
    pub fn reset_logger() {
        if let Ok(mut lock) = self::logger().write() {
            *lock = Box::new(DefaultLogger::new());
        }
    }

    /// Log without file:line (used by `engine_info!`, `engine_warn!`, ...)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = self::logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Log with file:line (used by `engine_error!`)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = self::logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
