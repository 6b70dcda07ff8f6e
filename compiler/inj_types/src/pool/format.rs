//! Type formatting for diagnostics, in source syntax.

use inj_ir::StringLookup;
use inj_stack::ensure_sufficient_stack;

use super::{FnParam, Member, Pool, Signature, TypeData};
use crate::Idx;

impl Pool {
    /// Format a type the way the source would write it.
    pub fn format_type(&self, idx: Idx, names: &impl StringLookup) -> String {
        let mut buf = String::new();
        self.format_type_into(idx, names, &mut buf);
        buf
    }

    pub fn format_type_into(&self, idx: Idx, names: &impl StringLookup, buf: &mut String) {
        ensure_sufficient_stack(|| self.format_type_into_inner(idx, names, buf));
    }

    fn format_type_into_inner(&self, idx: Idx, names: &impl StringLookup, buf: &mut String) {
        if let Some(name) = idx.name() {
            buf.push_str(name);
            return;
        }
        match self.data(idx) {
            TypeData::Primitive => buf.push_str("<reserved>"),
            TypeData::Named { name, .. } | TypeData::Unresolved(name) => {
                buf.push_str(names.lookup(*name));
            }
            TypeData::StringLiteral(value) => {
                buf.push('"');
                buf.push_str(names.lookup(*value));
                buf.push('"');
            }
            TypeData::Array(elem) => {
                self.format_operand(*elem, names, buf);
                buf.push_str("[]");
            }
            TypeData::Tuple(elems) => {
                buf.push('[');
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_type_into(*elem, names, buf);
                }
                buf.push(']');
            }
            TypeData::Union(members) => self.format_joined(members, " | ", names, buf),
            TypeData::Intersection(members) => self.format_joined(members, " & ", names, buf),
            TypeData::Function(sig) => {
                self.format_params(&sig.params, names, buf);
                buf.push_str(" => ");
                self.format_type_into(sig.ret, names, buf);
            }
            TypeData::Object(members) => self.format_members(members, names, buf),
        }
    }

    fn format_joined(&self, members: &[Idx], sep: &str, names: &impl StringLookup, buf: &mut String) {
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                buf.push_str(sep);
            }
            self.format_operand(*member, names, buf);
        }
    }

    /// Format a union/intersection/array operand, parenthesizing compound
    /// types that would otherwise re-associate.
    fn format_operand(&self, idx: Idx, names: &impl StringLookup, buf: &mut String) {
        let needs_parens = !idx.is_primitive()
            && matches!(
                self.data(idx),
                TypeData::Union(_) | TypeData::Intersection(_) | TypeData::Function(_)
            );
        if needs_parens {
            buf.push('(');
            self.format_type_into(idx, names, buf);
            buf.push(')');
        } else {
            self.format_type_into(idx, names, buf);
        }
    }

    fn format_params(&self, params: &[FnParam], names: &impl StringLookup, buf: &mut String) {
        buf.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            buf.push_str(names.lookup(param.name));
            if param.optional {
                buf.push('?');
            }
            buf.push_str(": ");
            self.format_type_into(param.ty, names, buf);
        }
        buf.push(')');
    }

    fn format_members(&self, members: &[Member], names: &impl StringLookup, buf: &mut String) {
        if members.is_empty() {
            buf.push_str("{}");
            return;
        }
        buf.push_str("{ ");
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                buf.push_str("; ");
            }
            buf.push_str(names.lookup(member.name));
            if member.optional {
                buf.push('?');
            }
            match self.method_signature(member) {
                Some(sig) => {
                    self.format_params(&sig.params, names, buf);
                    buf.push_str(": ");
                    self.format_type_into(sig.ret, names, buf);
                }
                None => {
                    buf.push_str(": ");
                    self.format_type_into(member.ty, names, buf);
                }
            }
        }
        buf.push_str(" }");
    }

    fn method_signature(&self, member: &Member) -> Option<&Signature> {
        if !member.is_method || member.ty.is_primitive() {
            return None;
        }
        match self.data(member.ty) {
            TypeData::Function(sig) => Some(sig),
            _ => None,
        }
    }
}
