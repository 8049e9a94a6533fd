use chrono::Utc;
use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::domain::click::{ClickCount, NewClickEvent};
use crate::domain::types::ProductId;
use crate::models::click::NewClick;
use crate::repository::{ClickReader, ClickWriter, DieselRepository, RepositoryResult};

impl ClickReader for DieselRepository {
    fn count_clicks_by_product(&self) -> RepositoryResult<Vec<ClickCount>> {
        use crate::schema::product_clicks;

        let mut conn = self.conn()?;

        let rows: Vec<(String, i64)> = product_clicks::table
            .group_by(product_clicks::product_id)
            .select((product_clicks::product_id, count_star()))
            .load(&mut conn)?;

        let counts = rows
            .into_iter()
            .filter_map(|(product_id, total)| {
                let product_id = ProductId::new(product_id).ok()?;
                Some(ClickCount {
                    product_id,
                    total_clicks: u64::try_from(total).unwrap_or(0),
                })
            })
            .collect();

        Ok(counts)
    }
}

impl ClickWriter for DieselRepository {
    fn record_click(&self, click: &NewClickEvent) -> RepositoryResult<()> {
        use crate::schema::product_clicks;

        let mut conn = self.conn()?;
        let row = NewClick::from_domain(click, Utc::now().naive_utc());

        diesel::insert_into(product_clicks::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(())
    }
}
