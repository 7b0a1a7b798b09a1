//! Typed access to the Sitebook backend.
//!
//! Every call returns `Result<T, ApiError>`: an empty collection is
//! `Ok(vec![])`, anything that went wrong is an `Err`. Bodies pass through
//! [`normalize`](super::normalize) before decoding.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sitebook_core::logging::targets;
use sitebook_core::{AppContext, EntityId};

use super::models::*;
use super::normalize::{decode, decode_list};
use crate::error::Result;
use crate::http::{HttpMethod, RestApiClient};

/// Bytes escaped in a path segment: everything but RFC 3986 unreserved.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Project-scoped collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProjectCollection {
    Estimates,
    Variations,
    PurchaseOrders,
    Expenses,
    Payslips,
}

impl ProjectCollection {
    fn segment(self) -> &'static str {
        match self {
            Self::Estimates => "estimates",
            Self::Variations => "variations",
            Self::PurchaseOrders => "purchase-orders",
            Self::Expenses => "expenses",
            Self::Payslips => "payslips",
        }
    }
}

/// The backend resource API.
///
/// Holds a [`RestApiClient`] and the [`AppContext`] it was created for;
/// the context supplies the current project for the `*_current` helpers.
#[derive(Clone, Debug)]
pub struct SitebookApi {
    client: RestApiClient,
    context: AppContext,
}

impl SitebookApi {
    /// Wrap a configured client.
    pub fn new(client: RestApiClient, context: AppContext) -> Self {
        Self { client, context }
    }

    /// The underlying REST client.
    pub fn client(&self) -> &RestApiClient {
        &self.client
    }

    /// The application context.
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// The selected project, or [`ApiError::NoProjectSelected`](crate::ApiError::NoProjectSelected).
    pub fn current_project(&self) -> Result<EntityId> {
        Ok(self.context.project().require()?)
    }

    // Projects

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.fetch_list("project", "/projects").await
    }

    pub async fn get_project(&self, id: &EntityId) -> Result<Project> {
        self.fetch_one("project", &record_path("projects", id)).await
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<Project> {
        self.send_json("project", HttpMethod::Post, "/projects", draft)
            .await
    }

    pub async fn update_project(&self, id: &EntityId, draft: &ProjectDraft) -> Result<Project> {
        self.send_json("project", HttpMethod::Put, &record_path("projects", id), draft)
            .await
    }

    pub async fn delete_project(&self, id: &EntityId) -> Result<()> {
        self.remove(&record_path("projects", id)).await
    }

    // Project-scoped collections

    pub async fn list_estimates(&self, project: &EntityId) -> Result<Vec<Estimate>> {
        self.fetch_list("estimate", &project_path(project, ProjectCollection::Estimates))
            .await
    }

    pub async fn create_estimate(
        &self,
        project: &EntityId,
        draft: &EstimateDraft,
    ) -> Result<Estimate> {
        let path = project_path(project, ProjectCollection::Estimates);
        self.send_json("estimate", HttpMethod::Post, &path, draft).await
    }

    pub async fn list_variations(&self, project: &EntityId) -> Result<Vec<Variation>> {
        self.fetch_list("variation", &project_path(project, ProjectCollection::Variations))
            .await
    }

    pub async fn create_variation(
        &self,
        project: &EntityId,
        draft: &VariationDraft,
    ) -> Result<Variation> {
        let path = project_path(project, ProjectCollection::Variations);
        self.send_json("variation", HttpMethod::Post, &path, draft).await
    }

    pub async fn list_purchase_orders(&self, project: &EntityId) -> Result<Vec<PurchaseOrder>> {
        let path = project_path(project, ProjectCollection::PurchaseOrders);
        self.fetch_list("purchase order", &path).await
    }

    pub async fn create_purchase_order(
        &self,
        project: &EntityId,
        draft: &PurchaseOrderDraft,
    ) -> Result<PurchaseOrder> {
        let path = project_path(project, ProjectCollection::PurchaseOrders);
        self.send_json("purchase order", HttpMethod::Post, &path, draft)
            .await
    }

    pub async fn list_expenses(&self, project: &EntityId) -> Result<Vec<Expense>> {
        self.fetch_list("expense", &project_path(project, ProjectCollection::Expenses))
            .await
    }

    pub async fn create_expense(&self, project: &EntityId, draft: &ExpenseDraft) -> Result<Expense> {
        let path = project_path(project, ProjectCollection::Expenses);
        self.send_json("expense", HttpMethod::Post, &path, draft).await
    }

    pub async fn list_payslips(&self, project: &EntityId) -> Result<Vec<Payslip>> {
        self.fetch_list("payslip", &project_path(project, ProjectCollection::Payslips))
            .await
    }

    pub async fn create_payslip(&self, project: &EntityId, draft: &PayslipDraft) -> Result<Payslip> {
        let path = project_path(project, ProjectCollection::Payslips);
        self.send_json("payslip", HttpMethod::Post, &path, draft).await
    }

    // Same collections, scoped to the selected project. These fail with
    // NoProjectSelected before any request is sent.

    pub async fn list_current_estimates(&self) -> Result<Vec<Estimate>> {
        self.list_estimates(&self.current_project()?).await
    }

    pub async fn list_current_variations(&self) -> Result<Vec<Variation>> {
        self.list_variations(&self.current_project()?).await
    }

    pub async fn list_current_purchase_orders(&self) -> Result<Vec<PurchaseOrder>> {
        self.list_purchase_orders(&self.current_project()?).await
    }

    pub async fn list_current_expenses(&self) -> Result<Vec<Expense>> {
        self.list_expenses(&self.current_project()?).await
    }

    pub async fn list_current_payslips(&self) -> Result<Vec<Payslip>> {
        self.list_payslips(&self.current_project()?).await
    }

    pub async fn create_current_purchase_order(
        &self,
        draft: &PurchaseOrderDraft,
    ) -> Result<PurchaseOrder> {
        self.create_purchase_order(&self.current_project()?, draft)
            .await
    }

    // Vendors

    pub async fn list_vendors(&self) -> Result<Vec<Vendor>> {
        self.fetch_list("vendor", "/vendors").await
    }

    pub async fn create_vendor(&self, draft: &VendorDraft) -> Result<Vendor> {
        self.send_json("vendor", HttpMethod::Post, "/vendors", draft)
            .await
    }

    pub async fn update_vendor(&self, id: &EntityId, draft: &VendorDraft) -> Result<Vendor> {
        self.send_json("vendor", HttpMethod::Put, &record_path("vendors", id), draft)
            .await
    }

    pub async fn delete_vendor(&self, id: &EntityId) -> Result<()> {
        self.remove(&record_path("vendors", id)).await
    }

    // Subcontractors

    pub async fn list_subcontractors(&self) -> Result<Vec<Subcontractor>> {
        self.fetch_list("subcontractor", "/subcontractors").await
    }

    pub async fn create_subcontractor(&self, draft: &SubcontractorDraft) -> Result<Subcontractor> {
        self.send_json("subcontractor", HttpMethod::Post, "/subcontractors", draft)
            .await
    }

    // Items

    pub async fn list_items(&self) -> Result<Vec<Item>> {
        self.fetch_list("item", "/items").await
    }

    /// Server-side item search. A blank query lists every item.
    pub async fn search_items(&self, query: &str) -> Result<Vec<Item>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_items().await;
        }
        let body: Value = self
            .client
            .get("/items")
            .query("search", query)
            .json_response()
            .await?;
        decode_list("item", body)
    }

    pub async fn create_item(&self, draft: &ItemDraft) -> Result<Item> {
        self.send_json("item", HttpMethod::Post, "/items", draft).await
    }

    pub async fn update_item(&self, id: &EntityId, draft: &ItemDraft) -> Result<Item> {
        self.send_json("item", HttpMethod::Put, &record_path("items", id), draft)
            .await
    }

    pub async fn delete_item(&self, id: &EntityId) -> Result<()> {
        self.remove(&record_path("items", id)).await
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
    ) -> Result<Vec<T>> {
        let body: Value = self.client.get(path).json_response().await?;
        let records = decode_list(resource, body)?;
        tracing::debug!(
            target: targets::RESOURCES,
            resource,
            path,
            count = records.len(),
            "fetched list"
        );
        Ok(records)
    }

    async fn fetch_one<T: DeserializeOwned>(&self, resource: &'static str, path: &str) -> Result<T> {
        let body: Value = self.client.get(path).json_response().await?;
        decode(resource, body)
    }

    async fn send_json<B, T>(
        &self,
        resource: &'static str,
        method: HttpMethod,
        path: &str,
        draft: &B,
    ) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body: Value = self
            .client
            .request(method, path)
            .json(draft)
            .json_response()
            .await?;
        tracing::debug!(target: targets::RESOURCES, resource, %method, path, "saved record");
        decode(resource, body)
    }

    async fn remove(&self, path: &str) -> Result<()> {
        self.client.delete(path).empty_response().await?;
        tracing::debug!(target: targets::RESOURCES, path, "deleted record");
        Ok(())
    }
}

fn encode_segment(id: &EntityId) -> String {
    utf8_percent_encode(id.as_str(), SEGMENT).to_string()
}

fn record_path(collection: &str, id: &EntityId) -> String {
    format!("/{collection}/{}", encode_segment(id))
}

fn project_path(project: &EntityId, collection: ProjectCollection) -> String {
    format!("/projects/{}/{}", encode_segment(project), collection.segment())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_paths() {
        let id = EntityId::from("p7");
        assert_eq!(
            project_path(&id, ProjectCollection::PurchaseOrders),
            "/projects/p7/purchase-orders"
        );
        assert_eq!(
            project_path(&id, ProjectCollection::Payslips),
            "/projects/p7/payslips"
        );
    }

    #[test]
    fn test_ids_are_escaped_as_one_segment() {
        assert_eq!(
            record_path("items", &EntityId::from("a/b?c#d")),
            "/items/a%2Fb%3Fc%23d"
        );
        assert_eq!(
            record_path("vendors", &EntityId::from("v-1_x.y~z")),
            "/vendors/v-1_x.y~z"
        );
        assert_eq!(
            project_path(&EntityId::from("p 1"), ProjectCollection::Expenses),
            "/projects/p%201/expenses"
        );
    }

    #[test]
    fn test_current_project_requires_selection() {
        let client = RestApiClient::builder("https://api.example.com")
            .build()
            .unwrap();
        let api = SitebookApi::new(client, AppContext::new());
        assert_eq!(
            api.current_project(),
            Err(crate::ApiError::NoProjectSelected)
        );

        api.context().project().select(EntityId::from("p1"));
        assert_eq!(api.current_project().unwrap(), EntityId::from("p1"));
    }
}
