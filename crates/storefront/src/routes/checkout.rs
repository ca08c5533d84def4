//! Checkout route handler and the WhatsApp hand-off.
//!
//! There is no payment integration. A completed checkout hands the buyer a
//! pre-filled WhatsApp message so payment is arranged over chat; the order
//! sits in `pending` until an operator confirms the transfer.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::services::checkout::{
    CheckoutOutcome, CheckoutReceipt, ShippingDetails, checkout as run_checkout, order_number,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub recipient_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
}

impl CheckoutRequest {
    fn validate(&self) -> Result<ShippingDetails> {
        let fields = [
            ("recipient_name", &self.recipient_name),
            ("phone", &self.phone),
            ("street", &self.street),
            ("city", &self.city),
            ("province", &self.province),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{name} is required")));
            }
        }
        Ok(ShippingDetails {
            recipient_name: self.recipient_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            province: self.province.trim().to_string(),
        })
    }
}

/// `POST /checkout` - convert the active cart into a pending order.
pub async fn checkout(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<serde_json::Value>> {
    let details = body.validate()?;
    let number = order_number(Utc::now());

    let outcome = run_checkout(state.store(), user.id, &details, number).await?;
    match outcome {
        CheckoutOutcome::EmptyCart => Ok(Json(serde_json::json!({
            "ok": false,
            "reason": "empty_cart",
        }))),
        CheckoutOutcome::Completed(receipt) => {
            let message = whatsapp_message(&receipt);
            let whatsapp_url = format!(
                "https://wa.me/{}?text={}",
                state.config().whatsapp_number,
                urlencoding::encode(&message),
            );
            Ok(Json(serde_json::json!({
                "ok": true,
                "order": receipt.order,
                "lines": receipt.lines,
                "subtotal": receipt.subtotal,
                "shipping_cost": receipt.shipping_cost,
                "grand_total": receipt.grand_total,
                "message": message,
                "whatsapp_url": whatsapp_url,
            })))
        }
    }
}

/// The pre-filled chat message, in Indonesian like the rest of the shop copy.
fn whatsapp_message(receipt: &CheckoutReceipt) -> String {
    let order_number = receipt.order.order_number.as_deref().unwrap_or("-");
    let mut lines = vec![
        "Halo, saya mau checkout pesanan.".to_string(),
        format!("Order: {order_number}"),
        format!("Order ID: {}", receipt.order.id),
        String::new(),
        "Item:".to_string(),
    ];
    for line in &receipt.lines {
        lines.push(format!(
            "- {} x{} = {}",
            line.title,
            line.qty,
            format_idr(line.subtotal)
        ));
    }
    lines.extend([
        String::new(),
        format!("Subtotal: {}", format_idr(receipt.subtotal)),
        format!("Ongkir: {}", format_idr(receipt.shipping_cost)),
        format!("Total Akhir: {}", format_idr(receipt.grand_total)),
        String::new(),
        "Alamat Pengiriman:".to_string(),
        format!("{} ({})", receipt.recipient_name, receipt.phone),
        receipt.street.clone(),
        format!("{}, {}", receipt.city, receipt.province),
        String::new(),
        "Mohon info cara pembayaran (transfer). Terima kasih.".to_string(),
    ]);
    lines.join("\n")
}

/// Format an amount as whole rupiah with dot thousand separators.
fn format_idr(amount: Decimal) -> String {
    let rounded = amount.round();
    let negative = rounded.is_sign_negative();
    let digits = rounded.abs().to_i128().unwrap_or(0).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("Rp -{grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use arc_audio_core::{Order, OrderId, OrderStatus, UserId};

    use crate::services::checkout::ReceiptLine;

    use super::*;

    #[test]
    fn test_format_idr() {
        assert_eq!(format_idr(Decimal::from(250_000)), "Rp 250.000");
        assert_eq!(format_idr(Decimal::from(1_299_000)), "Rp 1.299.000");
        assert_eq!(format_idr(Decimal::from(999)), "Rp 999");
        assert_eq!(format_idr(Decimal::ZERO), "Rp 0");
        assert_eq!(format_idr(Decimal::new(19_999_50, 2)), "Rp 20.000");
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let body = CheckoutRequest {
            recipient_name: "Budi".to_string(),
            phone: "0812345".to_string(),
            street: "Jl. Merdeka 1".to_string(),
            city: "  ".to_string(),
            province: "Jawa Barat".to_string(),
        };
        let err = body.validate().unwrap_err();
        assert_eq!(err.to_string(), "city is required");
    }

    #[test]
    fn test_whatsapp_message_layout() {
        let receipt = CheckoutReceipt {
            order: Order {
                id: OrderId::generate(),
                user_id: UserId::generate(),
                status: OrderStatus::Pending,
                order_number: Some("ORD-20250314-123456".to_string()),
                subtotal_amount: Decimal::from(250_000),
                shipping_cost: Decimal::from(20_000),
                total_amount: Decimal::from(270_000),
                shipping_province: Some("Jawa Barat".to_string()),
                shipping_city: Some("Bandung".to_string()),
                shipping_address: None,
                created_at: None,
            },
            lines: vec![ReceiptLine {
                title: "Arc Pulse".to_string(),
                qty: 2,
                unit_price: Decimal::from(125_000),
                subtotal: Decimal::from(250_000),
            }],
            subtotal: Decimal::from(250_000),
            shipping_cost: Decimal::from(20_000),
            grand_total: Decimal::from(270_000),
            recipient_name: "Budi".to_string(),
            phone: "0812345".to_string(),
            street: "Jl. Merdeka 1".to_string(),
            city: "Bandung".to_string(),
            province: "Jawa Barat".to_string(),
        };

        let message = whatsapp_message(&receipt);
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines[0], "Halo, saya mau checkout pesanan.");
        assert_eq!(lines[1], "Order: ORD-20250314-123456");
        assert_eq!(lines[4], "Item:");
        assert_eq!(lines[5], "- Arc Pulse x2 = Rp 250.000");
        assert_eq!(lines[7], "Subtotal: Rp 250.000");
        assert_eq!(lines[8], "Ongkir: Rp 20.000");
        assert_eq!(lines[9], "Total Akhir: Rp 270.000");
        assert_eq!(lines[11], "Alamat Pengiriman:");
        assert_eq!(lines[12], "Budi (0812345)");
        assert_eq!(lines[14], "Bandung, Jawa Barat");
        assert_eq!(
            lines.last().copied().unwrap(),
            "Mohon info cara pembayaran (transfer). Terima kasih."
        );
    }
}
