use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::schema::orders;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: String,
    pub product_id: String,
    pub product_name: Option<String>,
    pub product_price: Option<f64>,
    pub quantity: i32,
    pub status: String,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub version: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: String,
    pub product_id: String,
    pub product_name: Option<String>,
    pub product_price: Option<f64>,
    pub quantity: i32,
    pub status: String,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub version: i32,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            status: row.status.parse()?,
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            product_price: row.product_price,
            quantity: row.quantity,
            created_date: row.created_date,
            last_modified_date: row.last_modified_date,
            version: row.version,
        })
    }
}
