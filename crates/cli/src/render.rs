// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of command results.

use retail_analytics::{GeneratedSales, PersistSummary, ReferenceSummary};
use retail_analytics_persistence::{
    CustomerListing, Page, ProductListing, SaleDetail, SaleSummary, SalesPage, StoreListing,
    TotalMismatch,
};
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");

fn display_time(timestamp: PrimitiveDateTime) -> Result<String, time::error::Format> {
    timestamp.format(DISPLAY_FORMAT)
}

pub fn reference_summary(summary: &ReferenceSummary) -> String {
    let mut lines: Vec<String> = vec![
        format!("Regiões:    {}", summary.regions),
        format!("Categorias: {}", summary.categories),
        format!("Lojas:      {}", summary.stores),
        format!("Produtos:   {}", summary.products),
    ];
    if summary.categories_created > 0 {
        lines.push(format!(
            "{} categoria(s) criada(s) a partir do catálogo",
            summary.categories_created
        ));
    }
    lines.join("\n")
}

pub fn persist_summary(summary: &PersistSummary) -> String {
    [
        format!("Clientes:   {}", summary.customers),
        format!("Vendedores: {}", summary.salespeople),
        format!("Vendas:     {}", summary.sales),
        format!("Itens:      {}", summary.line_items),
        format!("Pagamentos: {}", summary.payments),
    ]
    .join("\n")
}

/// Counts of a generation that was not persisted.
pub fn dry_run_summary(generated: &GeneratedSales) -> String {
    [
        String::from("Simulação: nada foi gravado"),
        format!("Clientes:   {}", generated.customers.len()),
        format!("Vendedores: {}", generated.salespeople.len()),
        format!("Vendas:     {}", generated.sales.len()),
        format!("Itens:      {}", generated.line_item_count()),
        format!("Pagamentos: {}", generated.payment_count()),
    ]
    .join("\n")
}

fn sale_line(sale: &SaleSummary) -> Result<String, time::error::Format> {
    Ok(format!(
        "{:>8}  {}  {:<30}  {:<30}  {:<20}  R$ {:>10}",
        sale.id.value(),
        display_time(sale.sold_at)?,
        sale.customer,
        sale.salesperson,
        sale.store,
        sale.total.to_string()
    ))
}

/// Renders one page of the sales listing.
///
/// # Errors
///
/// Returns an error if a sale timestamp cannot be formatted.
pub fn sales_page(page: &SalesPage) -> Result<String, time::error::Format> {
    let mut lines: Vec<String> = vec![format!(
        "Página {} de {} ({} vendas)",
        page.page, page.total_pages, page.total_sales
    )];
    if page.sales.is_empty() {
        lines.push(String::from("Nenhuma venda nesta página"));
        return Ok(lines.join("\n"));
    }
    lines.push(format!(
        "{:>8}  {:<16}  {:<30}  {:<30}  {:<20}  {:>13}",
        "Venda", "Data", "Cliente", "Vendedor", "Loja", "Total"
    ));
    for sale in &page.sales {
        lines.push(sale_line(sale)?);
    }
    Ok(lines.join("\n"))
}

/// Header plus one line per row, or a notice when the page is empty.
fn listing<T>(
    page: &Page<T>,
    noun: &str,
    columns: String,
    row: impl Fn(&T) -> String,
) -> String {
    let mut lines: Vec<String> = vec![format!(
        "Página {} de {} ({} {noun})",
        page.page, page.total_pages, page.total
    )];
    if page.items.is_empty() {
        lines.push(String::from("Nenhum registro nesta página"));
        return lines.join("\n");
    }
    lines.push(columns);
    lines.extend(page.items.iter().map(row));
    lines.join("\n")
}

pub fn customers_page(page: &Page<CustomerListing>) -> String {
    listing(
        page,
        "clientes",
        format!("{:>8}  {:<30}  {:<40}  {}", "Cliente", "Nome", "Email", "Telefone"),
        |customer| {
            format!(
                "{:>8}  {:<30}  {:<40}  {}",
                customer.id.value(),
                customer.name,
                customer.email,
                customer.phone.as_deref().unwrap_or("-")
            )
        },
    )
}

pub fn products_page(page: &Page<ProductListing>) -> String {
    listing(
        page,
        "produtos",
        format!("{:>8}  {:<40}  {:<20}  {:>13}", "Produto", "Nome", "Categoria", "Preço"),
        |product| {
            format!(
                "{:>8}  {:<40}  {:<20}  R$ {:>10}",
                product.id.value(),
                product.name,
                product.category,
                product.price.to_string()
            )
        },
    )
}

pub fn stores_page(page: &Page<StoreListing>) -> String {
    listing(
        page,
        "lojas",
        format!("{:>8}  {:<30}  {}", "Loja", "Nome", "Região"),
        |store| format!("{:>8}  {:<30}  {}", store.id.value(), store.name, store.region),
    )
}

/// Renders one sale with its line items and payment.
///
/// # Errors
///
/// Returns an error if a timestamp cannot be formatted.
pub fn sale_detail(detail: &SaleDetail) -> Result<String, time::error::Format> {
    let summary: &SaleSummary = &detail.summary;
    let mut lines: Vec<String> = vec![
        format!("Venda {} em {}", summary.id, display_time(summary.sold_at)?),
        format!("Cliente:  {}", summary.customer),
        format!("Vendedor: {} (#{})", summary.salesperson, summary.salesperson_id),
        format!("Loja:     {} (#{})", summary.store, summary.store_id),
        String::from("Itens:"),
    ];
    for item in &detail.items {
        lines.push(format!(
            "  {} x {} (#{}) a R$ {} = R$ {}",
            item.quantity.get(),
            item.product,
            item.product_id,
            item.unit_price,
            item.subtotal
        ));
    }
    lines.push(format!("Total: R$ {}", summary.total));
    match &detail.payment {
        Some(payment) => lines.push(format!(
            "Pagamento: {} ({}) em {}",
            payment.method,
            payment.status,
            display_time(payment.created_at)?
        )),
        None => lines.push(String::from("Pagamento: nenhum")),
    }
    Ok(lines.join("\n"))
}

/// Renders the integrity audit.
pub fn check_result(mismatches: &[TotalMismatch], dangling: u64) -> String {
    let mut lines: Vec<String> = Vec::new();
    if mismatches.is_empty() {
        lines.push(String::from("Totais: todos consistentes"));
    } else {
        lines.push(format!("Totais: {} venda(s) inconsistente(s)", mismatches.len()));
        for mismatch in mismatches {
            lines.push(format!(
                "  venda {}: gravado R$ {}, calculado R$ {}",
                mismatch.sale_id, mismatch.recorded, mismatch.computed
            ));
        }
    }
    lines.push(format!("Referências pendentes: {dangling}"));
    lines.join("\n")
}
