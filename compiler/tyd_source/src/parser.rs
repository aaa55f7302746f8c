//! Recursive descent parser for Go type expressions.
//!
//! Parsed types are interned directly into the [`Pool`]. Names resolve
//! against a [`Scope`]: predeclared types first, then named types of the
//! current package, then `qualifier.Name` where the qualifier is an import
//! path or an import name.

use rustc_hash::FxHashMap;
use tyd_types::{ensure_sufficient_stack, BasicKind, ChanDir, Field, Idx, InterfaceMethod, PkgId, Pool};

use crate::lexer::{tokenize, Spanned, Token};
use crate::LoadError;

/// Name resolution context for type expressions.
#[derive(Clone, Debug)]
pub struct Scope {
    current: PkgId,
    imports: FxHashMap<String, PkgId>,
}

impl Scope {
    pub fn new(current: PkgId) -> Self {
        Scope {
            current,
            imports: FxHashMap::default(),
        }
    }

    /// Make `pkg` reachable under its package name.
    pub fn add_import(&mut self, name: &str, pkg: PkgId) {
        self.imports.insert(name.to_string(), pkg);
    }

    pub fn current(&self) -> PkgId {
        self.current
    }
}

/// Parse a type expression and intern the result.
pub fn parse_type(pool: &mut Pool, scope: &Scope, expr: &str) -> Result<Idx, LoadError> {
    let tokens = tokenize(expr).map_err(|offset| LoadError::BadType {
        expr: expr.to_string(),
        offset,
        message: "unexpected character".to_string(),
    })?;
    let mut parser = TypeParser {
        expr,
        tokens,
        pos: 0,
        pool,
        scope,
    };
    let ty = parser.parse_type()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(ty)
}

/// One entry of a parameter or result list before grouping is resolved.
enum Entry {
    /// A lone identifier: a parameter name or a type name, depending on the list.
    Bare(String),
    Typed {
        named: bool,
        ty: Idx,
        variadic: bool,
    },
}

struct TypeParser<'a> {
    expr: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
    pool: &'a mut Pool,
    scope: &'a Scope,
}

impl TypeParser<'_> {
    // === Cursor ===

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|s| s.token)
    }

    fn peek_nth(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.pos + n).map(|s| s.token)
    }

    fn text(&self) -> &str {
        match self.tokens.get(self.pos) {
            Some(s) => &self.expr[s.start..s.end],
            None => "",
        }
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.peek() == Some(token) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> Result<(), LoadError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {what}")))
        }
    }

    fn error(&self, message: &str) -> LoadError {
        let offset = self
            .tokens
            .get(self.pos)
            .map_or(self.expr.len(), |s| s.start);
        LoadError::BadType {
            expr: self.expr.to_string(),
            offset,
            message: message.to_string(),
        }
    }

    // === Types ===

    fn parse_type(&mut self) -> Result<Idx, LoadError> {
        ensure_sufficient_stack(|| match self.peek() {
            Some(Token::Star) => {
                self.bump();
                let elem = self.parse_type()?;
                Ok(self.pool.pointer(elem))
            }
            Some(Token::LBracket) => {
                self.bump();
                if self.eat(Token::RBracket) {
                    let elem = self.parse_type()?;
                    return Ok(self.pool.slice(elem));
                }
                if self.peek() != Some(Token::Int) {
                    return Err(self.error("expected array length"));
                }
                let len: u64 = self
                    .text()
                    .parse()
                    .map_err(|_| self.error("array length out of range"))?;
                self.bump();
                self.expect(Token::RBracket, "`]`")?;
                let elem = self.parse_type()?;
                Ok(self.pool.array(len, elem))
            }
            Some(Token::Map) => {
                self.bump();
                self.expect(Token::LBracket, "`[` after `map`")?;
                let key = self.parse_type()?;
                self.expect(Token::RBracket, "`]`")?;
                let value = self.parse_type()?;
                Ok(self.pool.map(key, value))
            }
            Some(Token::Chan) => {
                self.bump();
                let dir = if self.eat(Token::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type()?;
                Ok(self.pool.chan(dir, elem))
            }
            Some(Token::Arrow) => {
                self.bump();
                self.expect(Token::Chan, "`chan` after `<-`")?;
                let elem = self.parse_type()?;
                Ok(self.pool.chan(ChanDir::Recv, elem))
            }
            Some(Token::Func) => {
                self.bump();
                self.parse_signature()
            }
            Some(Token::Struct) => {
                self.bump();
                self.parse_struct()
            }
            Some(Token::Interface) => {
                self.bump();
                self.parse_interface()
            }
            Some(Token::LParen) => {
                self.bump();
                let ty = self.parse_type()?;
                self.expect(Token::RParen, "`)`")?;
                Ok(ty)
            }
            Some(Token::Ident) => {
                let name = self.text().to_string();
                self.bump();
                self.resolve(&name)
            }
            _ => Err(self.error("expected a type")),
        })
    }

    fn resolve(&mut self, name: &str) -> Result<Idx, LoadError> {
        let unknown = || LoadError::UnknownType {
            name: name.to_string(),
            expr: self.expr.to_string(),
        };

        if let Some((qualifier, local)) = name.rsplit_once('.') {
            if qualifier == "unsafe" && local == "Pointer" {
                return Ok(Idx::UNSAFE_POINTER);
            }
            let pkg = self
                .pool
                .lookup_package(qualifier)
                .or_else(|| self.scope.imports.get(qualifier).copied())
                .ok_or_else(unknown)?;
            return self.pool.lookup_named(pkg, local).ok_or_else(unknown);
        }

        if let Some(kind) = BasicKind::from_name(name) {
            return Ok(kind.idx());
        }
        match name {
            "error" => Ok(self.pool.error_type()),
            "any" => Ok(self.pool.empty_interface()),
            _ => self
                .pool
                .lookup_named(self.scope.current, name)
                .ok_or_else(unknown),
        }
    }

    // === Signatures ===

    /// Parse `(params) results` after `func` or a method name.
    fn parse_signature(&mut self) -> Result<Idx, LoadError> {
        let (params, variadic) = self.parse_params()?;
        let results = match self.peek() {
            Some(Token::LParen) => self.parse_params()?.0,
            Some(token) if token.starts_type() => vec![self.parse_type()?],
            _ => Vec::new(),
        };
        Ok(self.pool.signature(&params, &results, variadic))
    }

    /// Parse a parenthesized parameter list, resolving Go's name grouping
    /// (`a, b int`) once the whole list is known.
    fn parse_params(&mut self) -> Result<(Vec<Idx>, bool), LoadError> {
        self.expect(Token::LParen, "`(`")?;
        let mut entries = Vec::new();
        while !self.eat(Token::RParen) {
            entries.push(self.parse_entry()?);
            if !self.eat(Token::Comma) && self.peek() != Some(Token::RParen) {
                return Err(self.error("expected `,` or `)`"));
            }
        }

        let named = entries
            .iter()
            .any(|e| matches!(e, Entry::Typed { named: true, .. }));
        let variadic = matches!(entries.last(), Some(Entry::Typed { variadic: true, .. }));

        let mut types = Vec::with_capacity(entries.len());
        if named {
            // Names without a type take the type of the next typed entry.
            let mut pending = None;
            for entry in entries.iter().rev() {
                match entry {
                    Entry::Typed { ty, .. } => {
                        pending = Some(*ty);
                        types.push(*ty);
                    }
                    Entry::Bare(name) => match pending {
                        Some(ty) => types.push(ty),
                        None => {
                            return Err(self.error(&format!("parameter `{name}` has no type")))
                        }
                    },
                }
            }
            types.reverse();
        } else {
            for entry in entries {
                match entry {
                    Entry::Typed { ty, .. } => types.push(ty),
                    Entry::Bare(name) => types.push(self.resolve(&name)?),
                }
            }
        }
        Ok((types, variadic))
    }

    fn parse_entry(&mut self) -> Result<Entry, LoadError> {
        if self.eat(Token::Ellipsis) {
            let elem = self.parse_type()?;
            return Ok(Entry::Typed {
                named: false,
                ty: self.pool.slice(elem),
                variadic: true,
            });
        }
        if self.peek() == Some(Token::Ident) {
            match self.peek_nth(1) {
                Some(Token::Comma | Token::RParen) => {
                    let name = self.text().to_string();
                    self.bump();
                    return Ok(Entry::Bare(name));
                }
                Some(Token::Ellipsis) => {
                    self.pos += 2;
                    let elem = self.parse_type()?;
                    return Ok(Entry::Typed {
                        named: true,
                        ty: self.pool.slice(elem),
                        variadic: true,
                    });
                }
                Some(token) if token.starts_type() => {
                    self.bump();
                    let ty = self.parse_type()?;
                    return Ok(Entry::Typed {
                        named: true,
                        ty,
                        variadic: false,
                    });
                }
                _ => {}
            }
        }
        let ty = self.parse_type()?;
        Ok(Entry::Typed {
            named: false,
            ty,
            variadic: false,
        })
    }

    // === Structs and Interfaces ===

    fn parse_struct(&mut self) -> Result<Idx, LoadError> {
        self.expect(Token::LBrace, "`{` after `struct`")?;
        let mut fields = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RBrace) => {
                    self.bump();
                    break;
                }
                Some(Token::Semi) => self.bump(),
                Some(Token::Star) => {
                    self.bump();
                    let name = self.text().to_string();
                    let elem = self.parse_type()?;
                    let ty = self.pool.pointer(elem);
                    fields.push(embedded(&name, ty));
                }
                Some(Token::Ident)
                    if matches!(
                        self.peek_nth(1),
                        Some(Token::Semi | Token::RBrace | Token::Tag)
                    ) =>
                {
                    let name = self.text().to_string();
                    let ty = self.parse_type()?;
                    fields.push(embedded(&name, ty));
                }
                Some(Token::Ident) => {
                    let mut names = vec![self.text().to_string()];
                    self.bump();
                    while self.eat(Token::Comma) {
                        if self.peek() != Some(Token::Ident) {
                            return Err(self.error("expected field name"));
                        }
                        names.push(self.text().to_string());
                        self.bump();
                    }
                    let ty = self.parse_type()?;
                    fields.extend(names.into_iter().map(|name| Field::new(name, ty)));
                }
                _ => return Err(self.error("expected field or `}`")),
            }
            self.eat(Token::Tag);
        }
        Ok(self.pool.structure(fields))
    }

    fn parse_interface(&mut self) -> Result<Idx, LoadError> {
        self.expect(Token::LBrace, "`{` after `interface`")?;
        let mut methods = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RBrace) => {
                    self.bump();
                    break;
                }
                Some(Token::Semi) => self.bump(),
                Some(Token::Ident) if self.peek_nth(1) == Some(Token::LParen) => {
                    let name = self.text().to_string();
                    self.bump();
                    let sig = self.parse_signature()?;
                    methods.push(InterfaceMethod { name, sig });
                }
                _ => return Err(self.error("expected method or `}`")),
            }
        }
        Ok(self.pool.interface(methods))
    }
}

/// An embedded field is named after its type name without qualifier.
fn embedded(type_name: &str, ty: Idx) -> Field {
    let name = type_name.rsplit('.').next().unwrap_or(type_name);
    Field {
        name: name.to_string(),
        ty,
        embedded: true,
    }
}
