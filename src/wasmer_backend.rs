use wasmer::{imports, Engine, Instance, Module, Store, TypedFunction};

use crate::{exports, missing_export, wrong_type, Backend};

pub use wasmer;

/// Compiling backend built on [`wasmer`].
pub struct WasmerBackend {
    store: Store,
    add: TypedFunction<(i32, i32), i32>,
    multiply: TypedFunction<(f64, f64), f64>,
    divide: Option<TypedFunction<(f64, f64), f64>>,
    is_even: Option<TypedFunction<i32, i32>>,
}

impl WasmerBackend {
    pub fn new(wasm_bytes: &[u8]) -> anyhow::Result<Self> {
        let module_bytes = Self::serialize(wasm_bytes)?;
        // SAFETY: produced by `serialize` just above
        unsafe { Self::precompiled(&module_bytes) }
    }

    /// Compile `wasm_bytes` ahead of time, for later use with
    /// [`precompiled`](Self::precompiled).
    pub fn serialize(wasm_bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(Module::new(&Store::default(), wasm_bytes)?
            .serialize()?
            .to_vec())
    }

    /// Load a module compiled by [`serialize`](Self::serialize).
    ///
    /// # Safety
    ///
    /// `module_bytes` is native code. It must be the output of
    /// [`serialize`](Self::serialize) from the same wasmer version and
    /// must not have been tampered with; arbitrary bytes can run arbitrary
    /// code in the host.
    pub unsafe fn precompiled(module_bytes: &[u8]) -> anyhow::Result<Self> {
        let mut store = Store::new(Engine::headless());
        let module = Module::deserialize(&store, module_bytes)?;

        let instance = Instance::new(&mut store, &module, &imports! {})?;

        let add = instance
            .exports
            .get_typed_function::<(i32, i32), i32>(&store, exports::ADD)
            .map_err(|err| anyhow::anyhow!("export `{}`: {err}", exports::ADD))?;
        let multiply = instance
            .exports
            .get_typed_function::<(f64, f64), f64>(&store, exports::MULTIPLY)
            .map_err(|err| anyhow::anyhow!("export `{}`: {err}", exports::MULTIPLY))?;

        let divide = instance
            .exports
            .get_function(exports::DIVIDE)
            .ok()
            .map(|func| func.typed::<(f64, f64), f64>(&store))
            .transpose()
            .map_err(|err| wrong_type(exports::DIVIDE, err))?;
        let is_even = instance
            .exports
            .get_function(exports::IS_EVEN)
            .ok()
            .map(|func| func.typed::<i32, i32>(&store))
            .transpose()
            .map_err(|err| wrong_type(exports::IS_EVEN, err))?;

        log::debug!(
            "wasmer: instantiated calculator module (divide: {}, is_even: {})",
            divide.is_some(),
            is_even.is_some()
        );

        Ok(Self {
            store,
            add,
            multiply,
            divide,
            is_even,
        })
    }
}

impl Backend for WasmerBackend {
    fn add(&mut self, a: i32, b: i32) -> anyhow::Result<i32> {
        Ok(self.add.call(&mut self.store, a, b)?)
    }

    fn multiply(&mut self, a: f64, b: f64) -> anyhow::Result<f64> {
        Ok(self.multiply.call(&mut self.store, a, b)?)
    }

    fn divide(&mut self, a: f64, b: f64) -> anyhow::Result<f64> {
        let divide = self
            .divide
            .as_ref()
            .ok_or_else(|| missing_export(exports::DIVIDE))?;
        Ok(divide.call(&mut self.store, a, b)?)
    }

    fn is_even(&mut self, num: i32) -> anyhow::Result<bool> {
        let is_even = self
            .is_even
            .as_ref()
            .ok_or_else(|| missing_export(exports::IS_EVEN))?;
        Ok(is_even.call(&mut self.store, num)? != 0)
    }
}
