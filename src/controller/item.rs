use tracing::{debug, warn};

use crate::client::OrdersApi;
use crate::errors::ApiError;
use crate::models::{ItemForm, ItemRecord};
use crate::query::ItemFilters;
use crate::render;

use super::sequence::{RequestSequencer, Ticket};
use super::{FLASH_ITEM_DELETED, FLASH_SERVER_ERROR, FLASH_SUCCESS};

/// Controller for the order-item form. Structurally the order
/// controller with the item field set, an order-scoped URL and no
/// cancel action.
#[derive(Debug)]
pub struct ItemController {
    api: OrdersApi,
    form: ItemForm,
    flash: String,
    results: Vec<ItemRecord>,
    seq: RequestSequencer,
}

impl ItemController {
    pub fn new(api: OrdersApi) -> Self {
        Self::with_form(api, ItemForm::default())
    }

    pub fn with_form(api: OrdersApi, form: ItemForm) -> Self {
        Self {
            api,
            form,
            flash: String::new(),
            results: Vec::new(),
            seq: RequestSequencer::default(),
        }
    }

    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ItemForm {
        &mut self.form
    }

    pub fn flash(&self) -> &str {
        &self.flash
    }

    pub fn results(&self) -> &[ItemRecord] {
        &self.results
    }

    pub fn results_html(&self) -> String {
        render::item_results_table(&self.results)
    }

    pub async fn create(&mut self) {
        self.flash.clear();
        let ticket = self.seq.issue();
        let order_id = self.form.order_id.clone();
        let outcome = self.api.create_item(&order_id, &self.form.payload()).await;
        self.finish_save(ticket, outcome);
    }

    pub async fn update(&mut self) {
        self.flash.clear();
        let ticket = self.seq.issue();
        let order_id = self.form.order_id.clone();
        let item_id = self.form.item_id.clone();
        let outcome = self
            .api
            .update_item(&order_id, &item_id, &self.form.payload())
            .await;
        self.finish_save(ticket, outcome);
    }

    pub async fn retrieve(&mut self) {
        self.flash.clear();
        let ticket = self.seq.issue();
        let order_id = self.form.order_id.clone();
        let item_id = self.form.item_id.clone();
        let outcome = self.api.get_item(&order_id, &item_id).await;
        self.finish_retrieve(ticket, outcome);
    }

    pub async fn delete(&mut self) {
        self.flash.clear();
        let ticket = self.seq.issue();
        let order_id = self.form.order_id.clone();
        let item_id = self.form.item_id.clone();
        let outcome = self.api.delete_item(&order_id, &item_id).await;
        self.finish_delete(ticket, outcome);
    }

    pub fn clear(&mut self) {
        self.form.reset();
        self.flash.clear();
    }

    pub async fn search(&mut self) {
        self.flash.clear();
        let ticket = self.seq.issue();
        let order_id = self.form.order_id.clone();
        let query = ItemFilters::from(&self.form).to_query_string();
        let outcome = self.api.search_items(&order_id, &query).await;
        self.finish_search(ticket, outcome);
    }

    fn finish_save(&mut self, ticket: Ticket, outcome: Result<ItemRecord, ApiError>) {
        if !self.seq.is_current(ticket) {
            debug!("dropping stale item response");
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

    fn finish_retrieve(&mut self, ticket: Ticket, outcome: Result<ItemRecord, ApiError>) {
        if !self.seq.is_current(ticket) {
            debug!("dropping stale item response");
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
            debug!("dropping stale item response");
            return;
        }
        match outcome {
            Ok(()) => {
                self.form.clear_fields();
                self.flash = FLASH_ITEM_DELETED.to_string();
            }
            Err(err) => {
                warn!(error = %err, "item delete failed");
                self.flash = FLASH_SERVER_ERROR.to_string();
            }
        }
    }

    fn finish_search(&mut self, ticket: Ticket, outcome: Result<Vec<ItemRecord>, ApiError>) {
        if !self.seq.is_current(ticket) {
            debug!("dropping stale item search response");
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
            Err(err) => self.flash = err.flash_text(),
        }
    }
}
