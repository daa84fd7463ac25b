use wasmi::{
    core::{ValueType, F64},
    Engine, ExternType, Instance, Linker, Module, Store, TypedFunc,
};

use crate::{
    core::{Signature, ValType},
    exports, missing_export, wrong_type, Backend,
};

/// Interpreting backend built on [`wasmi`].
pub struct WasmiBackend {
    store: Store<()>,
    add: TypedFunc<(i32, i32), i32>,
    multiply: TypedFunc<(F64, F64), F64>,
    divide: Option<TypedFunc<(F64, F64), F64>>,
    is_even: Option<TypedFunc<i32, i32>>,
}

impl WasmiBackend {
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let engine = Engine::default();
        let module = Module::new(&engine, bytes)?;

        let mut store: Store<()> = Store::new(&engine, ());

        // calculator modules don't import anything
        let linker = <Linker<()>>::new(&engine);
        let instance = linker
            .instantiate(&mut store, &module)?
            .start(&mut store)?;

        let add = required(&instance, &store, exports::ADD)?
            .typed::<(i32, i32), i32>(&store)
            .map_err(|err| wrong_type(exports::ADD, err))?;
        let multiply = required(&instance, &store, exports::MULTIPLY)?
            .typed::<(F64, F64), F64>(&store)
            .map_err(|err| wrong_type(exports::MULTIPLY, err))?;

        let divide = instance
            .get_func(&store, exports::DIVIDE)
            .map(|func| func.typed::<(F64, F64), F64>(&store))
            .transpose()
            .map_err(|err| wrong_type(exports::DIVIDE, err))?;
        let is_even = instance
            .get_func(&store, exports::IS_EVEN)
            .map(|func| func.typed::<i32, i32>(&store))
            .transpose()
            .map_err(|err| wrong_type(exports::IS_EVEN, err))?;

        log::debug!(
            "wasmi: instantiated calculator module (divide: {}, is_even: {})",
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

/// Function exports of the module in `bytes`, in export order.
///
/// Nothing is instantiated, so this also works on modules a backend would
/// refuse to load.
pub fn export_signatures(bytes: &[u8]) -> anyhow::Result<Vec<Signature>> {
    let engine = Engine::default();
    let module = Module::new(&engine, bytes)?;

    let signatures = module
        .exports()
        .filter_map(|export| match export.ty() {
            ExternType::Func(func) => Some(Signature {
                name: export.name().to_string(),
                params: func.params().iter().copied().map(val_type).collect(),
                results: func.results().iter().copied().map(val_type).collect(),
            }),
            _ => None,
        })
        .collect();

    Ok(signatures)
}

fn val_type(ty: ValueType) -> ValType {
    match ty {
        ValueType::I32 => ValType::I32,
        ValueType::I64 => ValType::I64,
        ValueType::F32 => ValType::F32,
        ValueType::F64 => ValType::F64,
        ValueType::FuncRef => ValType::FuncRef,
        ValueType::ExternRef => ValType::ExternRef,
    }
}

fn required(instance: &Instance, store: &Store<()>, name: &str) -> anyhow::Result<wasmi::Func> {
    instance
        .get_func(store, name)
        .ok_or_else(|| missing_export(name))
}

impl Backend for WasmiBackend {
    fn add(&mut self, a: i32, b: i32) -> anyhow::Result<i32> {
        Ok(self.add.call(&mut self.store, (a, b))?)
    }

    fn multiply(&mut self, a: f64, b: f64) -> anyhow::Result<f64> {
        let product = self.multiply.call(&mut self.store, (a.into(), b.into()))?;
        Ok(product.into())
    }

    fn divide(&mut self, a: f64, b: f64) -> anyhow::Result<f64> {
        let divide = self.divide.as_ref().ok_or_else(|| missing_export(exports::DIVIDE))?;
        let quotient = divide.call(&mut self.store, (a.into(), b.into()))?;
        Ok(quotient.into())
    }

    fn is_even(&mut self, num: i32) -> anyhow::Result<bool> {
        let is_even = self.is_even.as_ref().ok_or_else(|| missing_export(exports::IS_EVEN))?;
        Ok(is_even.call(&mut self.store, num)? != 0)
    }
}
