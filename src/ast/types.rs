//! Type system of the language.
//!
//! Types are immutable once allocated in a [`Context`] and are referred to by
//! [`TypeId`]. Relations between types (equality, convertibility) live on the
//! context, because comparing pointer and function types needs to look at the
//! types they reference.

use super::{
    context::{Context, TypeId},
    operators::BinaryOperator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInId {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    F32,
    F64,
    Bool,
}

impl BuiltInId {
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            BuiltInId::I8 | BuiltInId::I16 | BuiltInId::I32 | BuiltInId::I64 | BuiltInId::I128
        )
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            BuiltInId::U8 | BuiltInId::U16 | BuiltInId::U32 | BuiltInId::U64 | BuiltInId::U128
        )
    }

    pub fn is_integral(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, BuiltInId::F32 | BuiltInId::F64)
    }

    pub fn is_bool(&self) -> bool {
        *self == BuiltInId::Bool
    }

    pub fn bits(&self) -> u32 {
        match self {
            BuiltInId::Bool => 1,
            BuiltInId::U8 | BuiltInId::I8 => 8,
            BuiltInId::U16 | BuiltInId::I16 => 16,
            BuiltInId::U32 | BuiltInId::I32 | BuiltInId::F32 => 32,
            BuiltInId::U64 | BuiltInId::I64 | BuiltInId::F64 => 64,
            BuiltInId::U128 | BuiltInId::I128 => 128,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltInId::U8 => "u8",
            BuiltInId::U16 => "u16",
            BuiltInId::U32 => "u32",
            BuiltInId::U64 => "u64",
            BuiltInId::U128 => "u128",
            BuiltInId::I8 => "i8",
            BuiltInId::I16 => "i16",
            BuiltInId::I32 => "i32",
            BuiltInId::I64 => "i64",
            BuiltInId::I128 => "i128",
            BuiltInId::F32 => "f32",
            BuiltInId::F64 => "f64",
            BuiltInId::Bool => "bool",
        }
    }

    /// Operators a value of this kind supports as left operand.
    pub fn supported_operators(&self) -> &'static [BinaryOperator] {
        if self.is_bool() {
            &BOOL_OPERATORS
        } else if self.is_floating() {
            &FLOATING_OPERATORS
        } else {
            &INTEGRAL_OPERATORS
        }
    }
}

pub static INTEGRAL_OPERATORS: [BinaryOperator; 16] = [
    BinaryOperator::Sum,
    BinaryOperator::Sub,
    BinaryOperator::Mul,
    BinaryOperator::Div,
    BinaryOperator::Mod,
    BinaryOperator::BitAnd,
    BinaryOperator::BitOr,
    BinaryOperator::BitXor,
    BinaryOperator::LeftShift,
    BinaryOperator::RightShift,
    BinaryOperator::Less,
    BinaryOperator::LessEqual,
    BinaryOperator::Greater,
    BinaryOperator::GreaterEqual,
    BinaryOperator::Equal,
    BinaryOperator::NotEqual,
];

pub static FLOATING_OPERATORS: [BinaryOperator; 11] = [
    BinaryOperator::Sum,
    BinaryOperator::Sub,
    BinaryOperator::Mul,
    BinaryOperator::Div,
    BinaryOperator::Mod,
    BinaryOperator::Less,
    BinaryOperator::LessEqual,
    BinaryOperator::Greater,
    BinaryOperator::GreaterEqual,
    BinaryOperator::Equal,
    BinaryOperator::NotEqual,
];

pub static BOOL_OPERATORS: [BinaryOperator; 7] = [
    BinaryOperator::BoolAnd,
    BinaryOperator::BoolOr,
    BinaryOperator::BitAnd,
    BinaryOperator::BitOr,
    BinaryOperator::BitXor,
    BinaryOperator::Equal,
    BinaryOperator::NotEqual,
];

/// Pointers can only be compared.
pub static POINTER_OPERATORS: [BinaryOperator; 2] =
    [BinaryOperator::Equal, BinaryOperator::NotEqual];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltInType {
    pub id: BuiltInId,
    pub is_const: bool,
    pub supported: &'static [BinaryOperator],
}

impl BuiltInType {
    pub fn new(id: BuiltInId, is_const: bool) -> Self {
        BuiltInType {
            id,
            is_const,
            supported: id.supported_operators(),
        }
    }

    pub fn supports(&self, op: BinaryOperator) -> bool {
        self.supported.iter().any(|supported| *supported == op)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Void,
    BuiltIn(BuiltInType),
    Pointer { is_const: bool, pointee: TypeId },
    Function { return_type: TypeId, params: Vec<TypeId> },
    /// Type of erroneous expressions. Compares equal to every type so that a
    /// single mistake does not cascade into more diagnostics.
    Error,
}

impl Type {
    pub fn is_const(&self) -> bool {
        match self {
            Type::BuiltIn(builtin) => builtin.is_const,
            Type::Pointer { is_const, .. } => *is_const,
            Type::Void | Type::Function { .. } | Type::Error => false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Type::Pointer { .. })
    }

    pub fn as_builtin(&self) -> Option<&BuiltInType> {
        match self {
            Type::BuiltIn(builtin) => Some(builtin),
            _ => None,
        }
    }

    pub fn builtin_id(&self) -> Option<BuiltInId> {
        self.as_builtin().map(|builtin| builtin.id)
    }

    pub fn is_bool(&self) -> bool {
        self.builtin_id().is_some_and(|id| id.is_bool())
    }

    /// Operators the type supports as left operand of a binary expression.
    pub fn supports(&self, op: BinaryOperator) -> bool {
        match self {
            Type::BuiltIn(builtin) => builtin.supports(op),
            Type::Pointer { .. } => POINTER_OPERATORS.contains(&op),
            Type::Error => true,
            Type::Void | Type::Function { .. } => false,
        }
    }
}

impl Context {
    pub fn create_void(&mut self) -> TypeId {
        self.add_type(Type::Void)
    }

    pub fn create_error(&mut self) -> TypeId {
        self.add_type(Type::Error)
    }

    pub fn create_builtin(&mut self, id: BuiltInId, is_const: bool) -> TypeId {
        self.add_type(Type::BuiltIn(BuiltInType::new(id, is_const)))
    }

    pub fn create_u8(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::U8, is_const)
    }

    pub fn create_u16(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::U16, is_const)
    }

    pub fn create_u32(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::U32, is_const)
    }

    pub fn create_u64(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::U64, is_const)
    }

    pub fn create_u128(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::U128, is_const)
    }

    pub fn create_i8(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::I8, is_const)
    }

    pub fn create_i16(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::I16, is_const)
    }

    pub fn create_i32(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::I32, is_const)
    }

    pub fn create_i64(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::I64, is_const)
    }

    pub fn create_i128(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::I128, is_const)
    }

    pub fn create_f32(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::F32, is_const)
    }

    pub fn create_f64(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::F64, is_const)
    }

    pub fn create_bool(&mut self, is_const: bool) -> TypeId {
        self.create_builtin(BuiltInId::Bool, is_const)
    }

    pub fn create_pointer(&mut self, is_const: bool, pointee: TypeId) -> TypeId {
        self.add_type(Type::Pointer { is_const, pointee })
    }

    pub fn create_fn(&mut self, return_type: TypeId, params: Vec<TypeId>) -> TypeId {
        self.add_type(Type::Function { return_type, params })
    }

    /// Same type as `id` with its top-level const flag set to `is_const`.
    /// Returns `id` itself when nothing changes.
    pub fn with_const(&mut self, id: TypeId, is_const: bool) -> TypeId {
        match self.get_type(id).clone() {
            Type::BuiltIn(builtin) if builtin.is_const != is_const => {
                self.create_builtin(builtin.id, is_const)
            }
            Type::Pointer { is_const: was_const, pointee } if was_const != is_const => {
                self.create_pointer(is_const, pointee)
            }
            _ => id,
        }
    }

    /// Structural equality, ignoring the top-level const flags.
    pub fn is_equal(&self, lhs: TypeId, rhs: TypeId) -> bool {
        match (self.get_type(lhs), self.get_type(rhs)) {
            (Type::Error, _) | (_, Type::Error) => true,
            (Type::Void, Type::Void) => true,
            (Type::BuiltIn(a), Type::BuiltIn(b)) => a.id == b.id,
            (Type::Pointer { pointee: a, .. }, Type::Pointer { pointee: b, .. }) => {
                self.is_equal_with_const(*a, *b)
            }
            (
                Type::Function { return_type: ret_a, params: params_a },
                Type::Function { return_type: ret_b, params: params_b },
            ) => {
                self.is_equal(*ret_a, *ret_b)
                    && params_a.len() == params_b.len()
                    && params_a
                        .iter()
                        .zip(params_b.iter())
                        .all(|(a, b)| self.is_equal(*a, *b))
            }
            _ => false,
        }
    }

    /// Structural equality that also requires equal top-level const flags.
    pub fn is_equal_with_const(&self, lhs: TypeId, rhs: TypeId) -> bool {
        self.get_type(lhs).is_const() == self.get_type(rhs).is_const() && self.is_equal(lhs, rhs)
    }

    /// Whether a value of type `from` can be converted to `to`, implicitly
    /// or through `as`.
    pub fn is_convertible(&self, from: TypeId, to: TypeId) -> bool {
        if self.is_equal(from, to) {
            return true;
        }
        matches!(
            (self.get_type(from), self.get_type(to)),
            (Type::BuiltIn(_), Type::BuiltIn(_)) | (Type::Pointer { .. }, Type::Pointer { .. })
        )
    }

    /// Renders a type the way it is written in source code.
    pub fn type_name(&self, id: TypeId) -> String {
        match self.get_type(id) {
            Type::Void => String::from("void"),
            Type::Error => String::from("<error>"),
            Type::BuiltIn(builtin) => {
                if builtin.is_const {
                    format!("const {}", builtin.id.name())
                } else {
                    String::from(builtin.id.name())
                }
            }
            Type::Pointer { is_const, pointee } => {
                let prefix = if *is_const { "const " } else { "" };
                format!("{}PTR<{}>", prefix, self.type_name(*pointee))
            }
            Type::Function { return_type, params } => {
                let params = params
                    .iter()
                    .map(|param| self.type_name(*param))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("fn({}) -> {}", params, self.type_name(*return_type))
            }
        }
    }
}
