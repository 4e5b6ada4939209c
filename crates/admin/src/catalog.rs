use shared::{
    domain::requests::{CreateProductRequest, FindAllProducts},
    model::Product,
};
use std::fmt;
use storefront_client::abstract_trait::product::DynProductClient;
use tracing::{error, info};
use validator::{Validate, ValidationErrors};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

const COLUMNS: [&str; 4] = ["NAME", "DESCRIPTION", "PRICE", "CATEGORY"];

/// User-facing outcome of a catalog action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ProductCreated,
    CreateFailed,
    LoadFailed,
    Invalid(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ProductCreated => f.write_str("Product created successfully"),
            Notice::CreateFailed => f.write_str("Error creating product"),
            Notice::LoadFailed => f.write_str("Error loading products"),
            Notice::Invalid(details) => write!(f, "Invalid product: {details}"),
        }
    }
}

/// Paged product list with a create flow, bound to a product client.
pub struct ProductCatalog {
    client: DynProductClient,
    products: Vec<Product>,
    total: u64,
    page: u32,
    page_size: u32,
    category: Option<String>,
    notices: Vec<Notice>,
}

impl ProductCatalog {
    pub fn new(client: DynProductClient) -> Self {
        Self::with_page_size(client, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(client: DynProductClient, page_size: u32) -> Self {
        Self {
            client,
            products: Vec::new(),
            total: 0,
            page: 1,
            page_size: page_size.max(1),
            category: None,
            notices: Vec::new(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Drains the notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Fetches the current page. On failure the previous rows stay in place.
    pub async fn load(&mut self) -> bool {
        let query = FindAllProducts::new(self.category.as_deref(), self.page, self.page_size);

        match self.client.list(&query).await {
            Ok(response) => {
                self.products = response.products;
                self.total = response.total;
                true
            }
            Err(err) => {
                error!("Error loading products: {err}");
                self.notices.push(Notice::LoadFailed);
                false
            }
        }
    }

    /// Validates locally, creates, then reloads the current page.
    pub async fn create(&mut self, form: &CreateProductRequest) -> bool {
        if let Err(errors) = form.validate() {
            self.notices.push(Notice::Invalid(describe(&errors)));
            return false;
        }

        match self.client.create(form).await {
            Ok(response) => {
                info!("Product {} created from catalog", response.product_id);
                self.notices.push(Notice::ProductCreated);
                self.load().await;
                true
            }
            Err(err) => {
                error!("Error creating product: {err}");
                self.notices.push(Notice::CreateFailed);
                false
            }
        }
    }

    pub async fn next_page(&mut self) -> bool {
        if self.page >= self.total_pages() {
            return false;
        }
        self.page += 1;
        self.load().await
    }

    pub async fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        self.load().await
    }

    /// Switches the category filter and starts over from page 1.
    pub async fn filter(&mut self, category: Option<&str>) -> bool {
        self.open(category, 1).await
    }

    pub async fn open(&mut self, category: Option<&str>, page: u32) -> bool {
        self.category = category.filter(|c| !c.is_empty()).map(str::to_string);
        self.page = page.max(1);
        self.load().await
    }

    pub fn render_table(&self) -> String {
        let rows: Vec<[String; 4]> = self
            .products
            .iter()
            .map(|p| {
                [
                    p.name.clone(),
                    p.description.clone(),
                    format!("{:.2}", p.price),
                    p.category.clone(),
                ]
            })
            .collect();

        let mut widths = COLUMNS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, &COLUMNS.map(str::to_string), &widths);
        for row in &rows {
            push_row(&mut out, row, &widths);
        }
        out.push_str(&format!(
            "page {} of {} ({} products)",
            self.page,
            self.total_pages(),
            self.total
        ));
        out
    }
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
