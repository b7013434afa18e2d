//! Record descriptors and flattening.
//!
//! A [`Record`] describes its exportable shape as a tree of [`FieldSpec`]
//! descriptors: leaf fields carry an accessor producing the value's
//! canonical string form, nested records contribute their own descriptors
//! spliced in place. Flattening walks that tree depth-first, once for the
//! header labels and once per element for the values, so headers and rows
//! are positionally aligned by construction.

use std::fmt::Display;

use crate::error::ExportError;

/// Export target a field label applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Spreadsheet workbook export.
    Excel,
    /// PDF table export.
    Pdf,
}

type Accessor<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

enum Node<T> {
    Leaf(Accessor<T>),
    Group(Vec<FieldSpec<T>>),
}

/// Descriptor for one exportable field of a record type.
///
/// Built once per type in [`Record::fields`]; labels are static metadata,
/// not per-instance state.
pub struct FieldSpec<T> {
    ident: &'static str,
    excel: Option<&'static str>,
    pdf: Option<&'static str>,
    node: Node<T>,
}

impl<T: 'static> FieldSpec<T> {
    /// A leaf field: an identifier plus an accessor producing any
    /// displayable value.
    ///
    /// Values are captured in their canonical string form — decimal
    /// numbers, `true`/`false` booleans.
    pub fn leaf<V, F>(ident: &'static str, get: F) -> Self
    where
        V: Display,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        FieldSpec {
            ident,
            excel: None,
            pdf: None,
            node: Node::Leaf(Box::new(move |item: &T| get(item).to_string())),
        }
    }

    /// A nested record field.
    ///
    /// The sub-record's descriptors are re-rooted through `project` here,
    /// at build time, so flattening needs no special case for composition
    /// or embedding.
    pub fn group<U>(
        ident: &'static str,
        project: for<'a> fn(&'a T) -> &'a U,
        fields: Vec<FieldSpec<U>>,
    ) -> Self
    where
        U: 'static,
    {
        FieldSpec {
            ident,
            excel: None,
            pdf: None,
            node: Node::Group(fields.into_iter().map(|f| f.rebase(project)).collect()),
        }
    }

    /// Label used for spreadsheet export.
    pub fn excel_label(mut self, label: &'static str) -> Self {
        self.excel = Some(label);
        self
    }

    /// Label used for PDF export.
    pub fn pdf_label(mut self, label: &'static str) -> Self {
        self.pdf = Some(label);
        self
    }

    /// Rewrite this descriptor to hang off a parent type.
    fn rebase<P: 'static>(self, project: for<'a> fn(&'a P) -> &'a T) -> FieldSpec<P> {
        let node = match self.node {
            Node::Leaf(get) => Node::Leaf(Box::new(move |item: &P| get(project(item)))),
            Node::Group(children) => {
                Node::Group(children.into_iter().map(|c| c.rebase(project)).collect())
            }
        };
        FieldSpec {
            ident: self.ident,
            excel: self.excel,
            pdf: self.pdf,
            node,
        }
    }

    /// Display label for the given target: the target's label when present
    /// and non-empty, the field identifier otherwise.
    fn label(&self, target: Target) -> &'static str {
        let tag = match target {
            Target::Excel => self.excel,
            Target::Pdf => self.pdf,
        };
        match tag {
            Some(label) if !label.is_empty() => label,
            _ => self.ident,
        }
    }
}

/// A type that can be exported as the rows of a table.
pub trait Record: Sized + 'static {
    /// Field descriptors in declaration order.
    fn fields() -> Vec<FieldSpec<Self>>;
}

impl<T: Record> Record for Box<T> {
    fn fields() -> Vec<FieldSpec<Self>> {
        T::fields()
            .into_iter()
            .map(|f| f.rebase(|boxed: &Box<T>| &**boxed))
            .collect()
    }
}

fn for_each_leaf<'a, T, F>(fields: &'a [FieldSpec<T>], visit: &mut F)
where
    F: FnMut(&'a FieldSpec<T>, &'a Accessor<T>),
{
    for field in fields {
        match &field.node {
            Node::Leaf(get) => visit(field, get),
            Node::Group(children) => for_each_leaf(children, visit),
        }
    }
}

/// Flatten a slice of records into an ordered header list and one row of
/// stringified values per element.
///
/// Headers and rows come from the same depth-first traversal of the
/// descriptor tree, so every row has exactly one value per header.
pub fn flatten<T: Record>(
    items: &[T],
    target: Target,
) -> Result<(Vec<String>, Vec<Vec<String>>), ExportError> {
    if items.is_empty() {
        return Err(ExportError::EmptyInput);
    }

    let fields = T::fields();

    let mut headers = Vec::new();
    for_each_leaf(&fields, &mut |field, _| {
        headers.push(field.label(target).to_string());
    });
    if headers.is_empty() {
        return Err(ExportError::NoExportableFields);
    }

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let mut row = Vec::with_capacity(headers.len());
        for_each_leaf(&fields, &mut |_, get| row.push(get(item)));
        rows.push(row);
    }

    Ok((headers, rows))
}
