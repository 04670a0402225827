use crate::utils::Result;
use std::collections::HashMap;

pub const FILE_COLUMN: &str = "file";
pub const SCHEME_COLUMN: &str = "scheme";
pub const ST_COLUMN: &str = "ST";

/// Number of identification columns preceding the loci.
pub const ID_COLUMN_COUNT: usize = 3;

/// Marker used by mlst for an undetermined scheme, ST or allele.
pub const UNTYPED: &str = "-";

/// Headerless rows as read from mlst output, one per sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Joins accepted rows into one table.
    ///
    /// Nothing to join is an error, an empty table would only fail later
    /// stages with less helpful messages.
    pub fn concat(rows: Vec<Vec<String>>) -> Result<Self> {
        if rows.is_empty() {
            return Err("No objects to concatenate: no MLST records passed input checks".into());
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// Column names plus a name to position lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.len() <= ID_COLUMN_COUNT {
            return Err(format!(
                "Expected at least {} columns ({}, {}, {} and one locus), found {}",
                ID_COLUMN_COUNT + 1,
                FILE_COLUMN,
                SCHEME_COLUMN,
                ST_COLUMN,
                names.len()
            ));
        }
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            // Duplicate names resolve to their first column
            index.entry(name.clone()).or_insert(i);
        }
        Ok(Self { names, index })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn loci(&self) -> &[String] {
        &self.names[ID_COLUMN_COUNT..]
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn width(&self) -> usize {
        self.names.len()
    }
}

/// One sample's fields in column order, still untyped text.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn file(&self) -> &str {
        &self.fields[0]
    }

    pub fn scheme(&self) -> &str {
        &self.fields[1]
    }

    pub fn st(&self) -> &str {
        &self.fields[2]
    }

    pub fn designations(&self) -> &[String] {
        &self.fields[ID_COLUMN_COUNT..]
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// A named, rectangular table of untyped records.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    header: Header,
    records: Vec<Record>,
}

impl Table {
    pub fn new(header: Header, records: Vec<Record>) -> Result<Self> {
        if let Some((i, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.fields.len() != header.width())
        {
            return Err(format!(
                "Row {} has {} fields, expected {} ({})",
                i + 1,
                record.fields.len(),
                header.width(),
                record.fields.join("\t")
            ));
        }
        Ok(Self { header, records })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of the named column, `None` for an unknown name.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let position = self.header.position(name)?;
        Some(self.records.iter().map(move |r| r.fields[position].as_str()))
    }

    /// New table with the same header and the given records, which must come
    /// from this table.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            header: self.header.clone(),
            records,
        }
    }

    /// New table with the same header holding the records for which
    /// `predicate` holds.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&Record) -> bool,
    {
        Self {
            header: self.header.clone(),
            records: self.records.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }
}

/// Outcome of coercing one locus designation to an allele id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlleleCall {
    Parsed(i32),
    Missing,
}

impl AlleleCall {
    pub fn value(self) -> Option<i32> {
        match self {
            AlleleCall::Parsed(id) => Some(id),
            AlleleCall::Missing => None,
        }
    }
}

/// A fully typed sample: every locus resolved to an allele id.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub file: String,
    pub scheme: String,
    pub st: String,
    pub alleles: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTable {
    header: Header,
    profiles: Vec<Profile>,
}

impl ProfileTable {
    pub fn new(header: Header, profiles: Vec<Profile>) -> Self {
        Self { header, profiles }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Samples of the selected scheme with incomplete typing.
///
/// Records keep their original text. `integer_loci[i]` is set when every
/// value of locus `i` is a plain integer, such columns are written in
/// integer form.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedTable {
    table: Table,
    integer_loci: Vec<bool>,
}

impl FailedTable {
    pub fn new(table: Table) -> Self {
        let integer_loci = (0..table.header().loci().len())
            .map(|locus| {
                table
                    .records()
                    .iter()
                    .all(|r| r.designations()[locus].trim().parse::<i32>().is_ok())
            })
            .collect();
        Self {
            table,
            integer_loci,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn integer_loci(&self) -> &[bool] {
        &self.integer_loci
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Fields of `record` as they are written out.
    pub fn render(&self, record: &Record) -> Vec<String> {
        let mut fields: Vec<String> = record.fields()[..ID_COLUMN_COUNT].to_vec();
        for (designation, &integer) in record.designations().iter().zip(&self.integer_loci) {
            match designation.trim().parse::<i32>() {
                Ok(id) if integer => fields.push(id.to_string()),
                _ => fields.push(designation.clone()),
            }
        }
        fields
    }
}
