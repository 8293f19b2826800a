//! Trees as the parser produces them: references are raw names.

use crate::{ast, Name};

pub type Ref = Name;
pub type Expr = super::Expr<Ref>;
pub type Exp = ast::Exp<Expr, Ref>;
pub type Pattern = ast::Pattern<Expr, Ref>;
pub type Case = ast::Case<Expr, Ref>;
pub type Def = ast::Def<Expr, Ref>;
pub type Fields = ast::Fields<Expr, Ref>;
pub type Scope = ast::Scope<Expr, Ref>;
pub type Component = ast::Component<Expr, Ref>;
