//! Arena owning every type and expression of one compilation unit.
//!
//! Nodes are appended to vectors and never moved out or freed before the
//! context is dropped, so the `TypeId`/`ExprId` handles given out by the
//! `add_*` functions stay valid for the whole compilation. Handles are plain
//! indices: nodes can reference each other in cycles (a function body calling
//! the function itself) without any shared ownership.

use std::fmt;

use super::{ast::Expr, types::Type};

/// Handle to a [`Type`] stored in a [`Context`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

/// Handle to an [`Expr`] stored in a [`Context`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl TypeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

#[derive(Debug, Default)]
pub struct Context {
    types: Vec<Type>,
    exprs: Vec<Expr>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Takes ownership of `ty` and returns its handle.
    pub fn add_type(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    /// Takes ownership of `expr` and returns its handle.
    pub fn add_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    pub fn get_type(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Only function definitions are completed after insertion (body and
    /// return list); nothing else should go through this.
    pub(crate) fn get_expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }
}
