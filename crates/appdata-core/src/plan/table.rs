use serde::Serialize;

/// The eight tables a replace rewrites
///
/// Variant order is insert order (parents first), so the derived `Ord` sorts
/// tables the way they are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Table {
    Package,
    Department,
    UserData,
    Asset,
    StigAssetMap,
    UserStigAssetMap,
    Review,
    ReviewHistory,
}

impl Table {
    /// Parents before children
    pub const INSERT_ORDER: [Table; 8] = [
        Table::Package,
        Table::Department,
        Table::UserData,
        Table::Asset,
        Table::StigAssetMap,
        Table::UserStigAssetMap,
        Table::Review,
        Table::ReviewHistory,
    ];

    /// Children before parents; the exact reverse of `INSERT_ORDER`
    pub const DELETE_ORDER: [Table; 8] = [
        Table::ReviewHistory,
        Table::Review,
        Table::UserStigAssetMap,
        Table::StigAssetMap,
        Table::Asset,
        Table::UserData,
        Table::Department,
        Table::Package,
    ];

    /// Logical name used in stats and logs
    pub fn name(self) -> &'static str {
        match self {
            Table::Package => "package",
            Table::Department => "department",
            Table::UserData => "userData",
            Table::Asset => "asset",
            Table::StigAssetMap => "stigAssetMap",
            Table::UserStigAssetMap => "userStigAssetMap",
            Table::Review => "review",
            Table::ReviewHistory => "reviewHistory",
        }
    }

    /// Physical table name in the store
    pub fn sql_name(self) -> &'static str {
        match self {
            Table::Package => "package",
            Table::Department => "department",
            Table::UserData => "user_data",
            Table::Asset => "asset",
            Table::StigAssetMap => "stig_asset_map",
            Table::UserStigAssetMap => "user_stig_asset_map",
            Table::Review => "review",
            Table::ReviewHistory => "review_history",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
