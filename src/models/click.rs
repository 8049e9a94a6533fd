use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::click::NewClickEvent as DomainNewClickEvent;

/// Insertable row of the `product_clicks` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::product_clicks)]
pub struct NewClick {
    pub product_id: String,
    pub user_agent: String,
    pub created_at: NaiveDateTime,
}

impl NewClick {
    pub fn from_domain(click: &DomainNewClickEvent, created_at: NaiveDateTime) -> Self {
        Self {
            product_id: click.product_id.as_str().to_string(),
            user_agent: click.user_agent.clone(),
            created_at,
        }
    }
}
