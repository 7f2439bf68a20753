//! Фиксированные фразы net-snmp, которые заменяют значение в выводе

pub const NO_SUCH_OBJECT_STR: &str = "No Such Object available on this agent at this OID";
pub const NO_SUCH_INSTANCE_STR: &str = "No Such Instance currently exists at this OID";
pub const NO_MORE_VARIABLES_STR: &str =
    "No more variables left in this MIB View (It is past the end of the MIB tree)";

/// Все три фразы, в порядке замены при токенизации
pub const SENTINELS: [&str; 3] = [
    NO_SUCH_OBJECT_STR,
    NO_SUCH_INSTANCE_STR,
    NO_MORE_VARIABLES_STR,
];

// Псевдотипы записей
pub const NO_SUCH_OBJECT: &str = "No Such Object";
pub const NO_SUCH_INSTANCE: &str = "No Such Instance";
pub const ABSENT: &str = "absent";

pub const STRING: &str = "STRING";
