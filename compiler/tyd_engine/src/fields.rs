//! Field access for generated struct code.
//!
//! Fields of a struct declared in another package are only reachable by
//! name when exported. When any field is not, every field is read through
//! reflection and an `unsafe.Pointer` cast instead:
//!
//! ```go
//! thisv := reflect.Indirect(reflect.ValueOf(this))
//! *(*int)(unsafe.Pointer(thisv.Field(0).UnsafeAddr()))
//! ```
//!
//! which requires the variable to be a pointer to the struct.

use tyd_types::{Field, Idx, PkgId, Pool};

use crate::Printer;

/// The fields of one struct type and how generated code reaches them.
#[derive(Clone, Debug)]
pub struct StructFields {
    ty: Idx,
    fields: Vec<Field>,
    reflect: bool,
}

impl StructFields {
    /// `None` if `ty` is not a struct.
    pub fn new(pool: &Pool, ty: Idx, current: PkgId) -> Option<Self> {
        let fields = pool.struct_fields(ty)?.to_vec();
        let foreign = pool
            .named_info(ty)
            .is_some_and(|info| info.pkg != current);
        let reflect = foreign && fields.iter().any(|f| !f.is_exported());
        Some(StructFields {
            ty,
            fields,
            reflect,
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether fields are read through reflection.
    pub fn uses_reflect(&self) -> bool {
        self.reflect
    }

    /// The first field generated code cannot name.
    pub fn private_field(&self) -> Option<&Field> {
        if self.reflect {
            self.fields.iter().find(|f| !f.is_exported())
        } else {
            None
        }
    }

    pub fn ty(&self) -> Idx {
        self.ty
    }

    /// Emit the declarations `access` relies on for variable `var`.
    pub fn prelude(&self, printer: &mut Printer, var: &str) {
        if self.reflect {
            let reflect = printer.import("reflect");
            printer.line(format!(
                "{var}v := {reflect}.Indirect({reflect}.ValueOf({var}))"
            ));
        }
    }

    /// Expression for field `i` of `var`, usable as value and as assignment target.
    pub fn access(&self, printer: &mut Printer, pool: &Pool, var: &str, i: usize) -> String {
        let field = &self.fields[i];
        if !self.reflect {
            return format!("{var}.{}", field.name);
        }
        let unsafe_pkg = printer.import("unsafe");
        let ty = printer.type_string(pool, field.ty);
        format!("*(*{ty})({unsafe_pkg}.Pointer({var}v.Field({i}).UnsafeAddr()))")
    }
}
