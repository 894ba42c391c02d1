use std::path::Path;
use std::time::{Duration, Instant};

use wasmtime::{Config, Engine, ExternType, Linker, Module, Store};

use crate::config::HostConfig;
use crate::error::{HostError, HostResult};
use crate::imports::{self, IMPORT_NAMES};
use crate::state::{HostState, Published};

/// What a guest did during one [`Runtime::run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    pub published: Vec<Published>,
    pub guest_log: Vec<String>,
    pub elapsed: Duration,
}

impl RunReport {
    /// One `topic: data` line per published message.
    pub fn render_published(&self) -> String {
        self.published
            .iter()
            .map(|p| format!("{}: {}", p.topic, p.data))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Compiles guest modules and runs their entry point against [`HostState`].
pub struct Runtime {
    engine: Engine,
    config: HostConfig,
}

impl Runtime {
    pub fn new(config: HostConfig) -> HostResult<Self> {
        config.validate()?;
        let mut engine_config = Config::new();
        if config.fuel.is_some() {
            engine_config.consume_fuel(true);
        }
        let engine =
            Engine::new(&engine_config).map_err(|err| HostError::Engine(format!("{err:#}")))?;
        Ok(Self { engine, config })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Compile a `.wasm` or `.wat` file.
    pub fn load_file(&self, path: &Path) -> HostResult<Module> {
        let bytes = std::fs::read(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_bytes(&bytes)
    }

    /// Compile a module from binary or text format.
    pub fn load_bytes(&self, bytes: &[u8]) -> HostResult<Module> {
        Module::new(&self.engine, bytes).map_err(|err| HostError::Compile(format!("{err:#}")))
    }

    /// Functions the module imports from the configured import module that
    /// this host does not provide.
    pub fn unsupported_imports(&self, module: &Module) -> Vec<String> {
        module
            .imports()
            .filter(|import| import.module() == self.config.import_module)
            .filter(|import| {
                !matches!(import.ty(), ExternType::Func(_)) || !IMPORT_NAMES.contains(&import.name())
            })
            .map(|import| import.name().to_string())
            .collect()
    }

    /// Fails with [`HostError::UnsupportedImports`] if the module needs
    /// anything the host does not provide.
    pub fn check(&self, module: &Module) -> HostResult<()> {
        let unsupported = self.unsupported_imports(module);
        if unsupported.is_empty() {
            Ok(())
        } else {
            Err(HostError::UnsupportedImports(unsupported))
        }
    }

    /// Instantiate `module` and call its entry point to completion.
    pub fn run(&self, module: &Module) -> HostResult<RunReport> {
        let mut store = Store::new(&self.engine, HostState::new(self.config.clone()));
        if let Some(fuel) = self.config.fuel {
            store.set_fuel(fuel).map_err(|err| HostError::Engine(format!("{err:#}")))?;
        }

        let mut linker = Linker::new(&self.engine);
        imports::add_to_linker(&mut linker, &self.config.import_module)?;

        let instance = linker
            .instantiate(&mut store, module)
            .map_err(|err| HostError::Instantiate(format!("{err:#}")))?;

        let entry_point = &self.config.entry_point;
        let entry = instance
            .get_typed_func::<(), ()>(&mut store, entry_point)
            .map_err(|_| HostError::EntryPointNotFound(entry_point.clone()))?;

        log::info!("running `{}`", entry_point);
        let start = Instant::now();
        entry.call(&mut store, ()).map_err(HostError::from_guest)?;
        let elapsed = start.elapsed();

        let state = store.into_data();
        log::info!(
            "`{}` finished in {:?}: {} node(s), {} publisher(s), {} message(s) published",
            entry_point,
            elapsed,
            state.node_count(),
            state.publisher_count(),
            state.journal().len()
        );
        let (published, guest_log) = state.into_parts();
        Ok(RunReport {
            published,
            guest_log,
            elapsed,
        })
    }
}
