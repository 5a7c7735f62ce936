//! Row shapes returned by the roster and attendance stored functions.
//!
//! Column names follow the functions' result sets; the SQL in each adapter
//! casts every column so the declared SQL types always match.

use chrono::{DateTime, Utc};
use diesel::QueryableByName;
use diesel::sql_types::{BigInt, Nullable, Text, Timestamptz};

/// Row produced by `validar_hermano`.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct RosterRow {
    #[diesel(sql_type = Text)]
    #[diesel(column_name = nombre_hermano)]
    pub name: String,
    #[diesel(sql_type = Text)]
    #[diesel(column_name = dni_hermano)]
    pub dni: String,
    #[diesel(sql_type = Nullable<Text>)]
    #[diesel(column_name = nombre_grupo)]
    pub group: Option<String>,
}

/// Row produced by `registrar_asistencia_entrada`.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct AttendanceRow {
    #[diesel(sql_type = BigInt)]
    #[diesel(column_name = registro_id)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    #[diesel(column_name = hermano_nombre)]
    pub name: String,
    #[diesel(sql_type = Timestamptz)]
    #[diesel(column_name = fecha_registro)]
    pub recorded_at: DateTime<Utc>,
    #[diesel(sql_type = Text)]
    #[diesel(column_name = tipo_registro)]
    pub kind: String,
}
