// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use retail_analytics_domain::EntityKind;

use super::count_to_u64;
use crate::diesel_schema::{
    categories, customers, payments, products, regions, sale_line_items, sales, salespeople,
    stores,
};
use crate::error::PersistenceError;

/// Counts the rows of the table holding `kind`.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_rows(conn: &mut SqliteConnection, kind: EntityKind) -> Result<u64, PersistenceError> {
    let count: i64 = match kind {
        EntityKind::Region => regions::table.count().get_result(conn)?,
        EntityKind::Category => categories::table.count().get_result(conn)?,
        EntityKind::Store => stores::table.count().get_result(conn)?,
        EntityKind::Product => products::table.count().get_result(conn)?,
        EntityKind::Customer => customers::table.count().get_result(conn)?,
        EntityKind::Salesperson => salespeople::table.count().get_result(conn)?,
        EntityKind::Sale => sales::table.count().get_result(conn)?,
        EntityKind::SaleLineItem => sale_line_items::table.count().get_result(conn)?,
        EntityKind::Payment => payments::table.count().get_result(conn)?,
    };
    count_to_u64(count)
}
