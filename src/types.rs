/// Raw identifier taken from one entity column of a relation table.
/// Examples: `E1`, `D5`
pub type RawId = String;
/// Column name in a relation table.
/// Examples: `employeeId`, `departmentName`
pub type ColumnName = String;
/// Output field name in an assembled cluster record.
/// Examples: `employeeIds`, `departmentId_departmentName`
pub type FieldName = String;
/// Email domain (the part after `@`).
/// Examples: `gmail.com`, `subdomain.example.co.uk`
pub type DomainName = String;
/// Table cell payload. Cells are heterogeneous: strings, numbers, nulls, and
/// row-wise key/value maps all occur in relation exports.
pub type CellValue = serde_json::Value;
