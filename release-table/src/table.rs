use crate::{
    asset::{parse_asset_name, AssetPlatform},
    release::{Asset, Release},
};
use itertools::Itertools;

/// The first line of every generated table. A release description containing this string is
/// assumed to already have a table.
pub const TABLE_HEADER_MARKER: &str = "### Release Assets\n";

const COLUMNS: &str = "| OS | Architecture | Link |\n|---------|----------|-------------|\n";

// Checksum sidecar files are not something anyone wants to pick from a table.
const CHECKSUM_EXTENSION: &str = ".md5";

/// Builds the Markdown table describing the downloadable assets of `release`.
///
/// There is one row per asset in the order the forge returned them, except for `.md5` checksum
/// files, which are skipped. Assets whose names do not follow the `-<os>-<arch>.` convention get a
/// row with empty OS and architecture cells.
#[must_use]
pub fn build_table(release: &Release) -> String {
    let rows = release
        .assets
        .iter()
        .filter(|a| !a.name.ends_with(CHECKSUM_EXTENSION))
        .map(table_row)
        .join("");

    format!("{TABLE_HEADER_MARKER}{COLUMNS}{rows}")
}

fn table_row(asset: &Asset) -> String {
    let AssetPlatform { os, arch } = parse_asset_name(&asset.name);
    format!(
        "| {}  | {}  | [Download]({}) |\n",
        os.unwrap_or_default(),
        arch.unwrap_or_default(),
        asset.url,
    )
}

/// Returns true if `body` already contains a generated table. This only looks for the header line,
/// so a hand-edited table with the same header also counts.
#[must_use]
pub fn has_table(body: &str) -> bool {
    body.contains(TABLE_HEADER_MARKER)
}

/// Returns `body` with `table` appended after a blank line.
#[must_use]
pub fn append_table(body: &str, table: &str) -> String {
    format!("{body}\n\n{table}")
}
