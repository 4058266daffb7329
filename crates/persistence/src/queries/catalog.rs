// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use retail_analytics::{CategoryFilter, CategoryRecord};
use retail_analytics_domain::CategoryId;

use crate::diesel_schema::categories;
use crate::error::PersistenceError;

/// Lists the categories matching `filter`, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_categories(
    conn: &mut SqliteConnection,
    filter: &CategoryFilter,
) -> Result<Vec<CategoryRecord>, PersistenceError> {
    let mut query = categories::table
        .select((categories::category_id, categories::name))
        .order(categories::category_id.asc())
        .into_boxed();

    if let Some(name) = &filter.name {
        query = query.filter(categories::name.eq(name));
    }

    let rows: Vec<(i64, String)> = query.load::<(i64, String)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| CategoryRecord {
            id: CategoryId::new(id),
            name,
        })
        .collect())
}
