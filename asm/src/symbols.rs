use indexmap::IndexMap;
use serde::Serialize;

/// What a reference says about a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymbolKind {
    Text,
    Data,
    Ref,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolHandle(pub u32);

/// Symbol table the parser reports references to. Looking a name up twice
/// must return the same handle.
pub trait SymbolTable {
    fn lookup_or_create(&mut self, name: &str, kind: SymbolKind) -> SymbolHandle;
}

/// Default table: handles are insertion indices.
#[derive(Debug, Default)]
pub struct Symbols(IndexMap<String, SymbolKind>);

impl Symbols {
    pub fn new() -> Self {
        Symbols(IndexMap::new())
    }

    pub fn name(&self, handle: SymbolHandle) -> Option<&str> {
        self.0.get_index(handle.0 as usize).map(|(name, _)| name.as_str())
    }

    pub fn kind(&self, handle: SymbolHandle) -> Option<SymbolKind> {
        self.0.get_index(handle.0 as usize).map(|(_, kind)| *kind)
    }

    pub fn get(&self, name: &str) -> Option<SymbolHandle> {
        self.0.get_index_of(name).map(|i| SymbolHandle(i as u32))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl SymbolTable for Symbols {
    /// A plain reference never downgrades a symbol already known to be text
    /// or data.
    fn lookup_or_create(&mut self, name: &str, kind: SymbolKind) -> SymbolHandle {
        let entry = self.0.entry(name.to_string());
        let index = entry.index();
        entry
            .and_modify(|k| {
                if *k == SymbolKind::Ref {
                    *k = kind;
                }
            })
            .or_insert(kind);
        SymbolHandle(index as u32)
    }
}

/// Names in TEXT, DATA, GLOBL and FUNCDATA spell the package separator as
/// `·`; the object file wants a plain `.` for the first one.
pub fn normalize(name: &str) -> String {
    name.replacen('·', ".", 1)
}

#[test]
fn test() {
    let mut symbols = Symbols::new();
    let a = symbols.lookup_or_create("runtime.memmove", SymbolKind::Ref);
    let b = symbols.lookup_or_create("x", SymbolKind::Data);
    assert_eq!(symbols.lookup_or_create("runtime.memmove", SymbolKind::Text), a);
    assert_ne!(a, b);
    assert_eq!(symbols.kind(a), Some(SymbolKind::Text));
    assert_eq!(symbols.lookup_or_create("x", SymbolKind::Ref), b);
    assert_eq!(symbols.kind(b), Some(SymbolKind::Data));
    assert_eq!(symbols.name(b), Some("x"));
    assert_eq!(symbols.get("nope"), None);
    assert_eq!(normalize("runtime·memmove·x"), "runtime.memmove·x");
}
