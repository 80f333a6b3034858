/// Constants used by cluster record field naming.
pub mod cluster {
    /// Suffix appended to an entity column name to form its members field
    /// (for example `employeeId` -> `employeeIds`).
    pub const MEMBERS_FIELD_SUFFIX: &str = "s";
    /// Joiner between the B-side column name and an auxiliary column name
    /// (for example `departmentId_departmentName`).
    pub const ATTRIBUTE_FIELD_JOINER: &str = "_";
}

/// Constants used by email syntax validation.
pub mod email {
    /// Accepted address shape: local part, `@`, dotted domain, alphabetic
    /// TLD of at least two letters.
    pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%&+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
    /// Separator between local part and domain.
    pub const DOMAIN_SEPARATOR: char = '@';
}

/// Constants used by the public-domain reference list and filter.
pub mod domains {
    /// Default file name for the public-domain reference list.
    pub const DEFAULT_REFERENCE_FILE: &str = "public_email_domains.csv";
    /// Header of the single reference-list column.
    pub const REFERENCE_COLUMN: &str = "public_email_domain";
}

/// Constants used by chunked CSV export.
pub mod export {
    /// Default upper bound on rows per exported file.
    pub const DEFAULT_MAX_LINES: usize = 500;
    /// Extension for exported files.
    pub const FILE_EXTENSION: &str = "csv";
}

/// Constants used by map-column disaggregation.
pub mod disagg {
    /// Prefix for expanded key columns (`key1`, `key2`, ...).
    pub const KEY_COLUMN_PREFIX: &str = "key";
    /// Prefix for expanded value columns (`value1`, `value2`, ...).
    pub const VALUE_COLUMN_PREFIX: &str = "value";
}

/// Constants used by table preview and render limits.
pub mod preview {
    /// Rows shown by a preview.
    pub const PREVIEW_ROWS: usize = 10;
    /// Default row cap applied when rendering outside a preview.
    pub const DEFAULT_MAX_ROWS: usize = 60;
    /// Default column cap applied when rendering outside a preview.
    pub const DEFAULT_MAX_COLUMNS: usize = 20;
    /// Default cell width cap in characters.
    pub const DEFAULT_MAX_COL_WIDTH: usize = 50;
    /// Marker shown where columns are elided by the column cap.
    pub const ELISION_MARKER: &str = "...";
    /// Separator between rendered cells.
    pub const CELL_SEPARATOR: &str = "  ";
}
