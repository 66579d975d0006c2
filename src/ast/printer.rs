//! S-expression rendering of expression trees.
//!
//! `var x: i64 = 1 + 2 * 3;` at global level dumps as
//! `(global x (+ 1 (* 2 3)))`. Local variable reads and writes carry their
//! slot (`a@0`), conversions their target type (`(as f64 x@1)`).

use super::{
    ast::{ExprKind, GLOBAL_ID},
    context::{Context, ExprId, TypeId},
    types::{BuiltInId, Type},
};

impl Context {
    pub fn dump_expr(&self, id: ExprId) -> String {
        let expr = self.get_expr(id);

        match &expr.kind {
            ExprKind::Error => String::from("<error>"),
            ExprKind::Literal { value } => self.dump_literal(*value, expr.ty),
            ExprKind::Unary { op, child } => format!("({} {})", op, self.dump_expr(*child)),
            ExprKind::Binary { lhs, op, rhs } => {
                format!("({} {} {})", op, self.dump_expr(*lhs), self.dump_expr(*rhs))
            }
            ExprKind::Convert { child } => {
                format!("(as {} {})", self.type_name(expr.ty), self.dump_expr(*child))
            }
            ExprKind::VarDecl { name, init, is_global } => {
                let keyword = if *is_global { "global" } else { "var" };
                match init {
                    Some(init) => format!("({} {} {})", keyword, name, self.dump_expr(*init)),
                    None => format!("({} {})", keyword, name),
                }
            }
            ExprKind::VarRead { name, local_id } => dump_variable(name, *local_id),
            ExprKind::VarWrite { name, value, local_id } => {
                format!("(= {} {})", dump_variable(name, *local_id), self.dump_expr(*value))
            }
            ExprKind::FnReturn { value } => match value {
                Some(value) => format!("(return {})", self.dump_expr(*value)),
                None => String::from("(return)"),
            },
            ExprKind::FnDef { name, params, body, .. } => {
                let params = params.join(" ");
                match body {
                    Some(body) => format!("(fn {} ({}) {})", name, params, self.dump_expr(*body)),
                    None => format!("(fn {} ({}))", name, params),
                }
            }
            ExprKind::FnCall { callee, args } => {
                let name = match &self.get_expr(*callee).kind {
                    ExprKind::FnDef { name, .. } => name.as_str(),
                    _ => "<error>",
                };
                self.dump_list(&format!("call {}", name), args)
            }
            ExprKind::Scope { body } => self.dump_list("scope", body),
            ExprKind::Condition { cond, then, otherwise } => match otherwise {
                Some(otherwise) => format!(
                    "(if {} {} {})",
                    self.dump_expr(*cond),
                    self.dump_expr(*then),
                    self.dump_expr(*otherwise)
                ),
                None => format!("(if {} {})", self.dump_expr(*cond), self.dump_expr(*then)),
            },
        }
    }

    /// Dumps a whole program, one top-level expression per line.
    pub fn dump_program(&self, expressions: &[ExprId]) -> String {
        expressions
            .iter()
            .map(|id| self.dump_expr(*id))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn dump_list(&self, head: &str, items: &[ExprId]) -> String {
        let mut out = format!("({}", head);
        for item in items {
            out.push(' ');
            out.push_str(&self.dump_expr(*item));
        }
        out.push(')');
        out
    }

    fn dump_literal(&self, value: u64, ty: TypeId) -> String {
        let Type::BuiltIn(builtin) = self.get_type(ty) else {
            return value.to_string();
        };

        match builtin.id {
            BuiltInId::Bool => (value != 0).to_string(),
            BuiltInId::F32 => format!("{:?}", f32::from_bits(value as u32)),
            BuiltInId::F64 => format!("{:?}", f64::from_bits(value)),
            id if id.is_signed() => (value as i64).to_string(),
            _ => value.to_string(),
        }
    }
}

fn dump_variable(name: &str, local_id: u64) -> String {
    if local_id == GLOBAL_ID {
        String::from(name)
    } else {
        format!("{}@{}", name, local_id)
    }
}
