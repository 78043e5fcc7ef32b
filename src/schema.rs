//! Declarative table definitions and the `parcel` schema.

/// Name of the table owned by the parcel store.
pub const PARCEL_TABLE: &str = "parcel";

/// Schema definition for the SQLite database
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// Statements that create every table and index, safe to re-run.
    pub fn statements(&self) -> Vec<String> {
        self.tables
            .iter()
            .flat_map(TableDefinition::statements)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub indexes: Vec<IndexDefinition>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(ColumnDefinition::to_sql)
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, columns)
    }

    fn statements(&self) -> Vec<String> {
        std::iter::once(self.create_sql())
            .chain(self.indexes.iter().map(|index| index.create_sql(&self.name)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.as_sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
    Real,
    Blob,
}

impl DataType {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
            Self::Real => "REAL",
            Self::Blob => "BLOB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    /// Only valid after `PrimaryKey` on an `INTEGER` column. Keeps SQLite from
    /// handing out the rowid of a deleted row again.
    AutoIncrement,
    NotNull,
    Unique,
}

impl ColumnConstraint {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::AutoIncrement => "AUTOINCREMENT",
            Self::NotNull => "NOT NULL",
            Self::Unique => "UNIQUE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

impl IndexDefinition {
    fn create_sql(&self, table: &str) -> String {
        format!(
            "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
            if self.unique { "UNIQUE " } else { "" },
            self.name,
            table,
            self.columns.join(", ")
        )
    }
}

/// The `parcel` table: `(number, client, status, address, created_at)`.
pub fn parcel_schema() -> Schema {
    use ColumnConstraint::*;

    Schema::new().add_table(
        TableDefinition::new(PARCEL_TABLE)
            .with_column(
                ColumnDefinition::new("number", DataType::Integer)
                    .with_constraint(PrimaryKey)
                    .with_constraint(AutoIncrement),
            )
            .with_column(ColumnDefinition::new("client", DataType::Integer).with_constraint(NotNull))
            .with_column(ColumnDefinition::new("status", DataType::Text).with_constraint(NotNull))
            .with_column(ColumnDefinition::new("address", DataType::Text).with_constraint(NotNull))
            .with_column(
                ColumnDefinition::new("created_at", DataType::Text).with_constraint(NotNull),
            )
            .with_index(IndexDefinition {
                name: "idx_parcel_client".to_string(),
                columns: vec!["client".to_string()],
                unique: false,
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parcel_table_sql() {
        let statements = parcel_schema().statements();
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE IF NOT EXISTS parcel (number INTEGER PRIMARY KEY AUTOINCREMENT, \
                 client INTEGER NOT NULL, status TEXT NOT NULL, address TEXT NOT NULL, \
                 created_at TEXT NOT NULL)"
                    .to_string(),
                "CREATE INDEX IF NOT EXISTS idx_parcel_client ON parcel (client)".to_string(),
            ]
        );
    }

    #[test]
    fn unique_index_sql() {
        let table = TableDefinition::new("t")
            .with_column(ColumnDefinition::new("k", DataType::Blob).with_constraint(ColumnConstraint::Unique))
            .with_index(IndexDefinition {
                name: "idx_t_k".to_string(),
                columns: vec!["k".to_string()],
                unique: true,
            });
        assert_eq!(table.create_sql(), "CREATE TABLE IF NOT EXISTS t (k BLOB UNIQUE)");
        assert_eq!(
            table.statements()[1],
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_t_k ON t (k)"
        );
    }

    #[test]
    fn statements_apply_twice() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        for _ in 0..2 {
            for sql in parcel_schema().statements() {
                conn.execute(&sql, []).unwrap();
            }
        }
    }
}
