//! Construction of priced, unsaved order lines.

use rust_decimal::Decimal;

use crate::domain::branch_product::{BranchProduct, BranchProductSize};
use crate::domain::modifier::Modifier;
use crate::domain::order::{NewOrderItem, SelectedModifier};
use crate::domain::product::Product;
use crate::domain::size::Size;
use crate::pricing::{cents_to_decimal, decimal_to_cents, resolver};

/// Records backing one requested order line, loaded by the caller.
///
/// Availability of the product and size override must already have been
/// checked; requested modifiers may still contain unavailable entries, which
/// are skipped here without failing the line.
pub struct LineRequest<'a> {
    /// Product being ordered.
    pub product: &'a Product,
    /// Branch-level override for the product.
    pub branch_product: &'a BranchProduct,
    /// Selected size, if any.
    pub size: Option<&'a Size>,
    /// Size-level override record, when one exists for the selected size.
    pub size_override: Option<&'a BranchProductSize>,
    /// Requested modifiers as loaded from the catalog.
    pub modifiers: &'a [Modifier],
    /// Number of units ordered.
    pub quantity: i32,
    /// Free-text customer remark.
    pub remark: Option<&'a str>,
}

/// Build a priced, unsaved order line from loaded records.
///
/// Pure: safe to call any number of times for dry-run pricing previews.
/// The discount applies to the resolved unit price only, never to modifier
/// cost. Rounding to cents happens once per produced amount; intermediate
/// arithmetic keeps full precision.
pub fn build_line(request: LineRequest<'_>) -> NewOrderItem {
    let resolved = resolver::resolve(
        request.product,
        request.branch_product,
        request.size_override,
    );

    let selected_modifiers: Vec<SelectedModifier> = request
        .modifiers
        .iter()
        .filter(|modifier| modifier.is_available)
        .map(|modifier| SelectedModifier {
            id: modifier.id,
            name: modifier.name.clone(),
            price_cents: modifier.price_cents,
        })
        .collect();
    let modifier_total_cents: i64 = selected_modifiers
        .iter()
        .map(|modifier| modifier.price_cents)
        .sum();

    let quantity = Decimal::from(request.quantity);
    let line_subtotal_cents =
        (resolved.effective_price_cents + modifier_total_cents) * i64::from(request.quantity);
    let line_discount = resolved.unit_discount() * quantity;
    let final_unit_price = (cents_to_decimal(line_subtotal_cents) - line_discount) / quantity;

    NewOrderItem {
        product_id: request.product.id,
        product_name: request.product.name.clone(),
        size_id: request.size.map(|size| size.id),
        size_name: request.size.map(|size| size.name.clone()),
        branch_product_size_id: request.size_override.map(|so| so.id),
        base_price_cents: resolved.effective_price_cents,
        original_price_cents: request.product.base_price_cents,
        modifier_total_cents,
        item_discount_cents: decimal_to_cents(line_discount),
        discount_percentage: resolved.applied_percentage(),
        discount_source: resolved.applied_source(),
        final_unit_price_cents: decimal_to_cents(final_unit_price),
        quantity: request.quantity,
        selected_modifiers,
        remark: compose_remark(
            request.size.map(|size| size.name.as_str()),
            request.modifiers,
            request.remark,
        ),
    }
}

/// Compose the customization remark shown to the kitchen.
///
/// Order: bracketed size tag, `+`-prefixed modifier names, then the trimmed
/// free-text remark. Returns `None` when every part is empty.
fn compose_remark(
    size_name: Option<&str>,
    modifiers: &[Modifier],
    free_text: Option<&str>,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(name) = size_name {
        parts.push(format!("[{name}]"));
    }
    for modifier in modifiers.iter().filter(|modifier| modifier.is_available) {
        parts.push(format!("+{}", modifier.name));
    }
    if let Some(text) = free_text {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
