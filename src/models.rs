use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserializes any JSON scalar into the string a form field shows.
///
/// The service is loose about scalar types: ids arrive as numbers,
/// amounts sometimes as numbers and sometimes as strings. Every record
/// field goes through this coercion so a record always mirrors what the
/// form would display. `null` and missing fields both land as `""`.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// Flat mirror of one order as the service returns it. Unknown response
/// fields (the embedded `items` list among them) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub order_date: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub status: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub shipping_address: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub total_amount: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub payment_method: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub shipping_cost: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub expected_date: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub order_notes: String,
}

/// Flat mirror of one order item as the service returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub order_id: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub product_id: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub quantity: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub unit_price: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub total_price: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub description: String,
}

/// Create/update body for an order. The id never travels in the body
/// (it is path-only) and `items` is always posted empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderPayload {
    pub customer_id: String,
    pub order_date: String,
    pub status: String,
    pub shipping_address: String,
    pub total_amount: String,
    pub payment_method: String,
    pub shipping_cost: String,
    pub expected_date: String,
    pub order_notes: String,
    pub items: Vec<ItemPayload>,
}

/// Create/update body for an order item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemPayload {
    pub order_id: String,
    pub product_id: String,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub total_price: String,
    pub description: String,
}

/// View-model for the order form: the cross-action memory the admin
/// page keeps in its DOM inputs. Always holds either the most recent
/// server-confirmed snapshot or blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub order_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub total_amount: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub shipping_cost: String,
    #[serde(default)]
    pub expected_date: String,
    #[serde(default)]
    pub order_notes: String,
}

impl OrderForm {
    /// Request body built from the editable fields.
    pub fn payload(&self) -> OrderPayload {
        OrderPayload {
            customer_id: self.customer_id.clone(),
            order_date: self.order_date.clone(),
            status: self.status.clone(),
            shipping_address: self.shipping_address.clone(),
            total_amount: self.total_amount.clone(),
            payment_method: self.payment_method.clone(),
            shipping_cost: self.shipping_cost.clone(),
            expected_date: self.expected_date.clone(),
            order_notes: self.order_notes.clone(),
            items: Vec::new(),
        }
    }

    /// Overwrites the whole form, id included, from a server response.
    pub fn apply(&mut self, record: &OrderRecord) {
        self.order_id = record.id.clone();
        self.customer_id = record.customer_id.clone();
        self.order_date = record.order_date.clone();
        self.status = record.status.clone();
        self.shipping_address = record.shipping_address.clone();
        self.total_amount = record.total_amount.clone();
        self.payment_method = record.payment_method.clone();
        self.shipping_cost = record.shipping_cost.clone();
        self.expected_date = record.expected_date.clone();
        self.order_notes = record.order_notes.clone();
    }

    /// Blanks every field except the id: the shape after a delete or a
    /// failed lookup.
    pub fn clear_fields(&mut self) {
        self.customer_id.clear();
        self.order_date.clear();
        self.status.clear();
        self.shipping_address.clear();
        self.total_amount.clear();
        self.payment_method.clear();
        self.shipping_cost.clear();
        self.expected_date.clear();
        self.order_notes.clear();
    }

    /// Blanks the whole form, id included: the Clear button.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// View-model for the item form. The item id is the one field that
/// `clear_fields` leaves alone; the order id scoping the item is
/// cleared with the rest, matching the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit_price: String,
    #[serde(default)]
    pub total_price: String,
    #[serde(default)]
    pub description: String,
}

impl ItemForm {
    pub fn payload(&self) -> ItemPayload {
        ItemPayload {
            order_id: self.order_id.clone(),
            product_id: self.product_id.clone(),
            name: self.name.clone(),
            quantity: self.quantity.clone(),
            unit_price: self.unit_price.clone(),
            total_price: self.total_price.clone(),
            description: self.description.clone(),
        }
    }

    pub fn apply(&mut self, record: &ItemRecord) {
        self.item_id = record.id.clone();
        self.order_id = record.order_id.clone();
        self.product_id = record.product_id.clone();
        self.name = record.name.clone();
        self.quantity = record.quantity.clone();
        self.unit_price = record.unit_price.clone();
        self.total_price = record.total_price.clone();
        self.description = record.description.clone();
    }

    pub fn clear_fields(&mut self) {
        self.order_id.clear();
        self.product_id.clear();
        self.name.clear();
        self.quantity.clear();
        self.unit_price.clear();
        self.total_price.clear();
        self.description.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
