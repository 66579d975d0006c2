use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::Span;

use super::{
    context::{Context, ExprId, TypeId},
    operators::{BinaryOperator, UnaryOperator},
};

/// Local id of variables living in the global namespace.
pub const GLOBAL_ID: u64 = u64::MAX;

/// Expression kinds.
///
/// Everything the language can express is an expression, declarations and
/// control flow included. Children are referenced through their [`ExprId`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Sentinel substituted for anything that failed to parse or check.
    Error,
    /// Raw 64-bit payload: the integer value, IEEE bits for floats, 0/1 for
    /// booleans. The expression type says how to read it.
    Literal { value: u64 },
    Unary { op: UnaryOperator, child: ExprId },
    Binary { lhs: ExprId, op: BinaryOperator, rhs: ExprId },
    /// Conversion of `child` to the type of the node.
    Convert { child: ExprId },
    VarDecl { name: String, init: Option<ExprId>, is_global: bool },
    /// `local_id` is the slot of the local, or [`GLOBAL_ID`].
    VarRead { name: String, local_id: u64 },
    VarWrite { name: String, value: ExprId, local_id: u64 },
    FnReturn { value: Option<ExprId> },
    /// `body` is `None` for prototypes. `returns` lists every `return`
    /// expression of the body, in source order.
    FnDef { name: String, params: Vec<String>, body: Option<ExprId>, returns: Vec<ExprId> },
    /// `callee` is the `FnDef` selected by overload resolution.
    FnCall { callee: ExprId, args: Vec<ExprId> },
    Scope { body: Vec<ExprId> },
    Condition { cond: ExprId, then: ExprId, otherwise: Option<ExprId> },
}

impl ExprKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Error => "Error",
            ExprKind::Literal { .. } => "Literal",
            ExprKind::Unary { .. } => "Unary",
            ExprKind::Binary { .. } => "Binary",
            ExprKind::Convert { .. } => "Convert",
            ExprKind::VarDecl { .. } => "VarDecl",
            ExprKind::VarRead { .. } => "VarRead",
            ExprKind::VarWrite { .. } => "VarWrite",
            ExprKind::FnReturn { .. } => "FnReturn",
            ExprKind::FnDef { .. } => "FnDef",
            ExprKind::FnCall { .. } => "FnCall",
            ExprKind::Scope { .. } => "Scope",
            ExprKind::Condition { .. } => "Condition",
        }
    }

    /// Discriminant mixed into structural hashes.
    fn tag(&self) -> u64 {
        match self {
            ExprKind::Error => 1,
            ExprKind::Literal { .. } => 2,
            ExprKind::Unary { .. } => 3,
            ExprKind::Binary { .. } => 4,
            ExprKind::Convert { .. } => 5,
            ExprKind::VarDecl { .. } => 6,
            ExprKind::VarRead { .. } => 7,
            ExprKind::VarWrite { .. } => 8,
            ExprKind::FnReturn { .. } => 9,
            ExprKind::FnDef { .. } => 10,
            ExprKind::FnCall { .. } => 11,
            ExprKind::Scope { .. } => 12,
            ExprKind::Condition { .. } => 13,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: TypeId,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: TypeId, span: Span) -> Self {
        Expr { kind, ty, span }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ExprKind::Error)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Literal { .. })
    }
}

/// Boost-style hash mixing.
pub fn hash_combine(seed: u64, value: u64) -> u64 {
    seed ^ value
        .wrapping_add(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

fn hash_leaf<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

impl Context {
    /// Structural equality of two expression trees.
    ///
    /// Types and spans are not compared. Function definitions, scopes and
    /// calls are never equal to anything, themselves included.
    pub fn expr_eq(&self, lhs: ExprId, rhs: ExprId) -> bool {
        let (a, b) = (&self.get_expr(lhs).kind, &self.get_expr(rhs).kind);

        match (a, b) {
            (ExprKind::Error, ExprKind::Error) => true,
            (ExprKind::Literal { value: x }, ExprKind::Literal { value: y }) => x == y,
            (ExprKind::Unary { op: op_a, child: a }, ExprKind::Unary { op: op_b, child: b }) => {
                op_a == op_b && self.expr_eq(*a, *b)
            }
            (
                ExprKind::Binary { lhs: lhs_a, op: op_a, rhs: rhs_a },
                ExprKind::Binary { lhs: lhs_b, op: op_b, rhs: rhs_b },
            ) => op_a == op_b && self.expr_eq(*lhs_a, *lhs_b) && self.expr_eq(*rhs_a, *rhs_b),
            (ExprKind::Convert { child: a }, ExprKind::Convert { child: b }) => self.expr_eq(*a, *b),
            (
                ExprKind::VarDecl { name: name_a, init: init_a, is_global: global_a },
                ExprKind::VarDecl { name: name_b, init: init_b, is_global: global_b },
            ) => name_a == name_b && global_a == global_b && self.opt_expr_eq(*init_a, *init_b),
            (
                ExprKind::VarRead { name: name_a, local_id: id_a },
                ExprKind::VarRead { name: name_b, local_id: id_b },
            ) => name_a == name_b && id_a == id_b,
            (
                ExprKind::VarWrite { name: name_a, value: value_a, local_id: id_a },
                ExprKind::VarWrite { name: name_b, value: value_b, local_id: id_b },
            ) => name_a == name_b && id_a == id_b && self.expr_eq(*value_a, *value_b),
            (ExprKind::FnReturn { value: a }, ExprKind::FnReturn { value: b }) => {
                self.opt_expr_eq(*a, *b)
            }
            (
                ExprKind::Condition { cond: cond_a, then: then_a, otherwise: else_a },
                ExprKind::Condition { cond: cond_b, then: then_b, otherwise: else_b },
            ) => {
                self.expr_eq(*cond_a, *cond_b)
                    && self.expr_eq(*then_a, *then_b)
                    && self.opt_expr_eq(*else_a, *else_b)
            }
            _ => false,
        }
    }

    fn opt_expr_eq(&self, lhs: Option<ExprId>, rhs: Option<ExprId>) -> bool {
        match (lhs, rhs) {
            (None, None) => true,
            (Some(a), Some(b)) => self.expr_eq(a, b),
            _ => false,
        }
    }

    /// Hash consistent with [`Context::expr_eq`]: equal trees hash equally.
    pub fn hash_expr(&self, id: ExprId) -> u64 {
        let kind = &self.get_expr(id).kind;
        let seed = kind.tag();

        match kind {
            ExprKind::FnDef { .. } | ExprKind::Scope { .. } | ExprKind::FnCall { .. } => 0,
            ExprKind::Error => seed,
            ExprKind::Literal { value } => hash_combine(seed, hash_leaf(value)),
            ExprKind::Unary { op, child } => {
                hash_combine(hash_combine(seed, hash_leaf(op)), self.hash_expr(*child))
            }
            ExprKind::Binary { lhs, op, rhs } => {
                let seed = hash_combine(seed, hash_leaf(op));
                let seed = hash_combine(seed, self.hash_expr(*lhs));
                hash_combine(seed, self.hash_expr(*rhs))
            }
            ExprKind::Convert { child } => hash_combine(seed, self.hash_expr(*child)),
            ExprKind::VarDecl { name, init, is_global } => {
                let seed = hash_combine(seed, hash_leaf(name.as_str()));
                let seed = hash_combine(seed, hash_leaf(is_global));
                hash_combine(seed, self.hash_opt_expr(*init))
            }
            ExprKind::VarRead { name, local_id } => {
                hash_combine(hash_combine(seed, hash_leaf(name.as_str())), hash_leaf(local_id))
            }
            ExprKind::VarWrite { name, value, local_id } => {
                let seed = hash_combine(seed, hash_leaf(name.as_str()));
                let seed = hash_combine(seed, hash_leaf(local_id));
                hash_combine(seed, self.hash_expr(*value))
            }
            ExprKind::FnReturn { value } => hash_combine(seed, self.hash_opt_expr(*value)),
            ExprKind::Condition { cond, then, otherwise } => {
                let seed = hash_combine(seed, self.hash_expr(*cond));
                let seed = hash_combine(seed, self.hash_expr(*then));
                hash_combine(seed, self.hash_opt_expr(*otherwise))
            }
        }
    }

    fn hash_opt_expr(&self, id: Option<ExprId>) -> u64 {
        id.map_or(0, |id| self.hash_expr(id))
    }

    /// Wraps `id` for use as a key of hash based collections.
    pub fn expr_ref(&self, id: ExprId) -> ExprRef<'_> {
        ExprRef { ctx: self, id }
    }
}

/// Expression handle compared and hashed structurally.
///
/// Not `Eq`: function definitions, scopes and calls are not equal to
/// themselves.
#[derive(Clone, Copy)]
pub struct ExprRef<'ctx> {
    pub ctx: &'ctx Context,
    pub id: ExprId,
}

impl PartialEq for ExprRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ctx, other.ctx) && self.ctx.expr_eq(self.id, other.id)
    }
}

impl Hash for ExprRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.ctx.hash_expr(self.id));
    }
}

impl std::fmt::Debug for ExprRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ctx.dump_expr(self.id))
    }
}
