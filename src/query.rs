use crate::models::{ItemForm, OrderForm};

/// Conditionally `&`-joined query string: a key is appended only when
/// its value is non-empty, the first appended pair has no leading `&`.
/// Values ride raw; the service's filter endpoints were built against
/// exactly these bytes.
#[derive(Debug, Default)]
struct QueryString(String);

impl QueryString {
    fn push(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        if !self.0.is_empty() {
            self.0.push('&');
        }
        self.0.push_str(key);
        self.0.push('=');
        self.0.push_str(value);
    }

    fn finish(self) -> String {
        self.0
    }
}

/// Search filters for orders.
///
/// The key names are the service's range-filter vocabulary, not typos:
/// `order_date` filters as the start of a date range (`order-start`)
/// and `total_amount` as a minimum (`total-min`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilters {
    pub customer_id: String,
    pub order_date: String,
    pub status: String,
    pub total_amount: String,
}

impl OrderFilters {
    pub fn to_query_string(&self) -> String {
        let mut query = QueryString::default();
        query.push("customer-id", &self.customer_id);
        query.push("order-start", &self.order_date);
        query.push("status", &self.status);
        query.push("total-min", &self.total_amount);
        query.finish()
    }
}

impl From<&OrderForm> for OrderFilters {
    fn from(form: &OrderForm) -> Self {
        Self {
            customer_id: form.customer_id.clone(),
            order_date: form.order_date.clone(),
            status: form.status.clone(),
            total_amount: form.total_amount.clone(),
        }
    }
}

/// Search filters for items within one order. The order itself is
/// path-scoped, not a query key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilters {
    pub product_id: String,
    pub name: String,
}

impl ItemFilters {
    pub fn to_query_string(&self) -> String {
        let mut query = QueryString::default();
        query.push("product_id", &self.product_id);
        query.push("name", &self.name);
        query.finish()
    }
}

impl From<&ItemForm> for ItemFilters {
    fn from(form: &ItemForm) -> Self {
        Self {
            product_id: form.product_id.clone(),
            name: form.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5", "", "open", "", "customer-id=5&status=open")]
    #[case("", "", "", "", "")]
    #[case("5", "", "", "", "customer-id=5")]
    #[case("", "2024-01-01", "", "", "order-start=2024-01-01")]
    #[case("", "", "", "100", "total-min=100")]
    #[case(
        "5",
        "2024-01-01",
        "open",
        "100",
        "customer-id=5&order-start=2024-01-01&status=open&total-min=100"
    )]
    fn order_filters_join_present_keys_only(
        #[case] customer_id: &str,
        #[case] order_date: &str,
        #[case] status: &str,
        #[case] total_amount: &str,
        #[case] expected: &str,
    ) {
        let filters = OrderFilters {
            customer_id: customer_id.to_string(),
            order_date: order_date.to_string(),
            status: status.to_string(),
            total_amount: total_amount.to_string(),
        };
        assert_eq!(filters.to_query_string(), expected);
    }

    #[rstest]
    #[case("p-1", "", "product_id=p-1")]
    #[case("", "widget", "name=widget")]
    #[case("p-1", "widget", "product_id=p-1&name=widget")]
    #[case("", "", "")]
    fn item_filters_join_present_keys_only(
        #[case] product_id: &str,
        #[case] name: &str,
        #[case] expected: &str,
    ) {
        let filters = ItemFilters {
            product_id: product_id.to_string(),
            name: name.to_string(),
        };
        assert_eq!(filters.to_query_string(), expected);
    }

    #[test]
    fn filters_come_straight_off_the_form() {
        let mut form = OrderForm::default();
        form.customer_id = "5".to_string();
        form.status = "open".to_string();
        assert_eq!(
            OrderFilters::from(&form).to_query_string(),
            "customer-id=5&status=open"
        );
    }
}
