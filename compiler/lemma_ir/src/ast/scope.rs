//! Scopes, components, and incremental scope construction.

use tracing::debug;

use super::{
    Builder, Def, Import, NameMap, Proof, ScopeId, Syntax, Truth, Visibility, VisibilityTable,
};
use crate::{Name, Span, StringLookup};

/// A lexical scope: three separate namespaces, a total definitions table,
/// proofs and imports.
#[derive(Clone, Debug)]
pub struct Scope<E, R> {
    pub pos: Span,
    pub id: ScopeId,
    pub builders: NameMap<Builder<E, R>>,
    pub syntax: NameMap<Syntax<E>>,
    pub truths: NameMap<Truth<E>>,
    pub defs: VisibilityTable<Vec<Def<E, R>>>,
    pub proofs: Vec<Proof<E, R>>,
    pub imports: Vec<Import<E>>,
}

impl<E, R> Scope<E, R> {
    /// A scope with nothing in it.
    pub fn empty(pos: Span, id: ScopeId) -> Self {
        Scope {
            pos,
            id,
            builders: NameMap::new(),
            syntax: NameMap::new(),
            truths: NameMap::new(),
            defs: VisibilityTable::default(),
            proofs: Vec::new(),
            imports: Vec::new(),
        }
    }

    /// Definitions in visibility order, then declaration order.
    pub fn all_defs(&self) -> impl Iterator<Item = (Visibility, &Def<E, R>)> {
        self.defs
            .iter()
            .flat_map(|(visibility, defs)| defs.iter().map(move |def| (visibility, def)))
    }
}

/// Top-level compilation unit.
#[derive(Clone, Debug)]
pub struct Component<E, R> {
    /// The name the unit is expected to export, if the header declares one.
    pub expected: Option<Name>,
    pub scope: Scope<E, R>,
}

/// Which namespace of a scope a name was bound in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Namespace {
    Builders,
    Syntax,
    Truths,
}

impl Namespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Builders => "builder",
            Namespace::Syntax => "syntax",
            Namespace::Truths => "truth",
        }
    }
}

/// A scope fragment that could not be added.
///
/// `Display` prints the raw name handle. [`ScopeError::describe`] resolves
/// it to the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    #[error("{name:?} is already bound in the {} namespace", .namespace.as_str())]
    DuplicateName { namespace: Namespace, name: Name },
}

impl ScopeError {
    pub fn describe(&self, symbols: &dyn StringLookup) -> String {
        match self {
            ScopeError::DuplicateName { namespace, name } => format!(
                "`{}` is already bound in the {} namespace",
                symbols.lookup(*name),
                namespace.as_str()
            ),
        }
    }
}

/// Parser-facing construction of a [`Scope`] from fragments in source order.
pub struct ScopeBuilder<E, R> {
    scope: Scope<E, R>,
}

impl<E, R> ScopeBuilder<E, R> {
    pub fn new(pos: Span, id: ScopeId) -> Self {
        ScopeBuilder {
            scope: Scope::empty(pos, id),
        }
    }

    pub fn builder(&mut self, name: Name, builder: Builder<E, R>) -> Result<&mut Self, ScopeError> {
        Self::bind(&mut self.scope.builders, Namespace::Builders, name, builder)?;
        Ok(self)
    }

    pub fn syntax(&mut self, name: Name, syntax: Syntax<E>) -> Result<&mut Self, ScopeError> {
        Self::bind(&mut self.scope.syntax, Namespace::Syntax, name, syntax)?;
        Ok(self)
    }

    pub fn truth(&mut self, name: Name, truth: Truth<E>) -> Result<&mut Self, ScopeError> {
        Self::bind(&mut self.scope.truths, Namespace::Truths, name, truth)?;
        Ok(self)
    }

    pub fn def(&mut self, visibility: Visibility, def: Def<E, R>) -> &mut Self {
        self.scope.defs[visibility].push(def);
        self
    }

    pub fn proof(&mut self, proof: Proof<E, R>) -> &mut Self {
        self.scope.proofs.push(proof);
        self
    }

    pub fn import(&mut self, import: Import<E>) -> &mut Self {
        self.scope.imports.push(import);
        self
    }

    pub fn finish(self) -> Scope<E, R> {
        self.scope
    }

    fn bind<V>(
        map: &mut NameMap<V>,
        namespace: Namespace,
        name: Name,
        value: V,
    ) -> Result<(), ScopeError> {
        map.try_insert(name, value).map_err(|_| {
            debug!(?name, namespace = namespace.as_str(), "rejected duplicate binding");
            ScopeError::DuplicateName { namespace, name }
        })
    }
}
