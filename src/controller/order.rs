use tracing::{debug, warn};

use crate::client::OrdersApi;
use crate::errors::ApiError;
use crate::models::{OrderForm, OrderRecord};
use crate::query::OrderFilters;
use crate::render;

use super::sequence::{RequestSequencer, Ticket};
use super::{
    FLASH_ORDER_CANCELLED, FLASH_ORDER_DELETED, FLASH_ORDER_ID_REQUIRED, FLASH_SERVER_ERROR,
    FLASH_SUCCESS,
};

/// Controller for the order form. Owns the view-model, the flash slot
/// and the last search results; each action is one request/response
/// transaction with no state machine behind it.
#[derive(Debug)]
pub struct OrderController {
    api: OrdersApi,
    form: OrderForm,
    flash: String,
    results: Vec<OrderRecord>,
    seq: RequestSequencer,
}

impl OrderController {
    pub fn new(api: OrdersApi) -> Self {
        Self::with_form(api, OrderForm::default())
    }

    /// Starts from a previously persisted form.
    pub fn with_form(api: OrdersApi, form: OrderForm) -> Self {
        Self {
            api,
            form,
            flash: String::new(),
            results: Vec::new(),
            seq: RequestSequencer::default(),
        }
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut OrderForm {
        &mut self.form
    }

    pub fn flash(&self) -> &str {
        &self.flash
    }

    pub fn results(&self) -> &[OrderRecord] {
        &self.results
    }

    /// The HTML table for the current results, escaped.
    pub fn results_html(&self) -> String {
        render::order_results_table(&self.results)
    }

    pub async fn create(&mut self) {
        self.flash.clear();
        let ticket = self.seq.issue();
        let outcome = self.api.create_order(&self.form.payload()).await;
        self.finish_save(ticket, outcome);
    }

    pub async fn update(&mut self) {
        self.flash.clear();
        let ticket = self.seq.issue();
        let id = self.form.order_id.clone();
        let outcome = self.api.update_order(&id, &self.form.payload()).await;
        self.finish_save(ticket, outcome);
    }

    pub async fn retrieve(&mut self) {
        self.flash.clear();
        let ticket = self.seq.issue();
        let id = self.form.order_id.clone();
        let outcome = self.api.get_order(&id).await;
        self.finish_retrieve(ticket, outcome);
    }

    pub async fn delete(&mut self) {
        self.flash.clear();
        let ticket = self.seq.issue();
        let id = self.form.order_id.clone();
        let outcome = self.api.delete_order(&id).await;
        self.finish_delete(ticket, outcome);
    }

    /// The one client-side precondition in the whole controller: cancel
    /// without an id never reaches the network.
    pub async fn cancel(&mut self) {
        if self.form.order_id.is_empty() {
            self.flash = FLASH_ORDER_ID_REQUIRED.to_string();
            return;
        }
        self.flash.clear();
        let ticket = self.seq.issue();
        let id = self.form.order_id.clone();
        let outcome = self.api.cancel_order(&id).await;
        self.finish_cancel(ticket, outcome);
    }

    /// Blanks the form (id included) and the flash. No network call;
    /// search results are left alone.
    pub fn clear(&mut self) {
        self.form.reset();
        self.flash.clear();
    }

    pub async fn search(&mut self) {
        self.flash.clear();
        let ticket = self.seq.issue();
        let query = OrderFilters::from(&self.form).to_query_string();
        let outcome = self.api.search_orders(&query).await;
        self.finish_search(ticket, outcome);
    }

    fn finish_save(&mut self, ticket: Ticket, outcome: Result<OrderRecord, ApiError>) {
        if !self.seq.is_current(ticket) {
            debug!("dropping stale order response");
            return;
        }
        match outcome {
            Ok(record) => {
                self.form.apply(&record);
                self.flash = FLASH_SUCCESS.to_string();
            }
            Err(err) => self.flash = err.flash_text(),
        }
    }

    fn finish_retrieve(&mut self, ticket: Ticket, outcome: Result<OrderRecord, ApiError>) {
        if !self.seq.is_current(ticket) {
            debug!("dropping stale order response");
            return;
        }
        match outcome {
            Ok(record) => {
                self.form.apply(&record);
                self.flash = FLASH_SUCCESS.to_string();
            }
            Err(err) => {
                self.form.clear_fields();
                self.flash = err.flash_text();
            }
        }
    }

    fn finish_delete(&mut self, ticket: Ticket, outcome: Result<(), ApiError>) {
        if !self.seq.is_current(ticket) {
            debug!("dropping stale order response");
            return;
        }
        match outcome {
            Ok(()) => {
                self.form.clear_fields();
                self.flash = FLASH_ORDER_DELETED.to_string();
            }
            Err(err) => {
                // The page always showed this fixed string for a failed
                // delete; the real cause only goes to the log.
                warn!(error = %err, "order delete failed");
                self.flash = FLASH_SERVER_ERROR.to_string();
            }
        }
    }

    fn finish_cancel(&mut self, ticket: Ticket, outcome: Result<(), ApiError>) {
        if !self.seq.is_current(ticket) {
            debug!("dropping stale order response");
            return;
        }
        match outcome {
            Ok(()) => {
                self.flash = FLASH_ORDER_CANCELLED.to_string();
                self.form.clear_fields();
            }
            Err(err) => self.flash = err.flash_text(),
        }
    }

    fn finish_search(&mut self, ticket: Ticket, outcome: Result<Vec<OrderRecord>, ApiError>) {
        if !self.seq.is_current(ticket) {
            debug!("dropping stale order search response");
            return;
        }
        match outcome {
            Ok(records) => {
                if let Some(first) = records.first() {
                    self.form.apply(first);
                }
                self.results = records;
                self.flash = FLASH_SUCCESS.to_string();
            }
            // Previous rows stay on screen after a failed search.
            Err(err) => self.flash = err.flash_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn controller() -> OrderController {
        OrderController::new(OrdersApi::new("http://localhost:1").unwrap())
    }

    fn record(id: &str) -> OrderRecord {
        OrderRecord {
            id: id.to_string(),
            ..OrderRecord::default()
        }
    }

    #[test]
    fn stale_search_response_is_dropped_entirely() {
        let mut ctl = controller();
        let stale = ctl.seq.issue();
        let _newer = ctl.seq.issue();

        ctl.finish_search(stale, Ok(vec![record("1")]));

        assert!(ctl.results().is_empty());
        assert!(ctl.flash().is_empty());
        assert_eq!(ctl.form().order_id, "");
    }

    #[test]
    fn current_search_response_lands_in_form_and_results() {
        let mut ctl = controller();
        let ticket = ctl.seq.issue();

        ctl.finish_search(ticket, Ok(vec![record("1"), record("2")]));

        assert_eq!(ctl.results().len(), 2);
        assert_eq!(ctl.form().order_id, "1");
        assert_eq!(ctl.flash(), FLASH_SUCCESS);
    }

    #[test]
    fn delete_failure_shows_the_fixed_message() {
        let mut ctl = controller();
        let ticket = ctl.seq.issue();

        ctl.finish_delete(
            ticket,
            Err(ApiError::Api {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "database on fire".to_string(),
            }),
        );

        assert_eq!(ctl.flash(), FLASH_SERVER_ERROR);
    }

    #[test]
    fn stale_save_does_not_overwrite_a_newer_one() {
        let mut ctl = controller();
        let first = ctl.seq.issue();
        let second = ctl.seq.issue();

        ctl.finish_save(second, Ok(record("2")));
        ctl.finish_save(first, Ok(record("1")));

        assert_eq!(ctl.form().order_id, "2");
    }
}
