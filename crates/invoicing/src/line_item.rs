use core::str::FromStr;

use serde::{Deserialize, Serialize};

use billdesk_core::{coerce_number, DomainError, ValueObject};

/// Unit of measure chosen for a line item.
///
/// The form offers a fixed choice set, but whatever text arrives is kept
/// verbatim in `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    #[default]
    Unspecified,
    /// "ชิ้น"
    Piece,
    /// "กิโลกรัม"
    Kilogram,
    Other(String),
}

impl Unit {
    /// The choices offered by the unit selector, in display order.
    pub fn choices() -> [Unit; 3] {
        [Unit::Unspecified, Unit::Piece, Unit::Kilogram]
    }

    pub fn label(&self) -> &str {
        match self {
            Unit::Unspecified => "",
            Unit::Piece => "ชิ้น",
            Unit::Kilogram => "กิโลกรัม",
            Unit::Other(raw) => raw,
        }
    }
}

impl From<&str> for Unit {
    fn from(raw: &str) -> Self {
        match raw {
            "" => Unit::Unspecified,
            "ชิ้น" => Unit::Piece,
            "กิโลกรัม" => Unit::Kilogram,
            other => Unit::Other(other.to_string()),
        }
    }
}

impl From<String> for Unit {
    fn from(raw: String) -> Self {
        Unit::from(raw.as_str())
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl ValueObject for Unit {}

/// Editable attributes of a line item.
///
/// `sequence_number` and `final_price` are deliberately absent: the first is
/// positional, the second is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineField {
    #[serde(rename = "productCode")]
    ProductCode,
    #[serde(rename = "qty")]
    Quantity,
    #[serde(rename = "weight")]
    Weight,
    #[serde(rename = "unitPrice")]
    UnitPrice,
    #[serde(rename = "unit")]
    Unit,
    #[serde(rename = "discount")]
    DiscountPercent,
}

impl LineField {
    pub const ALL: [LineField; 6] = [
        LineField::ProductCode,
        LineField::Quantity,
        LineField::Weight,
        LineField::UnitPrice,
        LineField::Unit,
        LineField::DiscountPercent,
    ];

    /// Name used by the form and the persisted item records.
    pub fn name(self) -> &'static str {
        match self {
            LineField::ProductCode => "productCode",
            LineField::Quantity => "qty",
            LineField::Weight => "weight",
            LineField::UnitPrice => "unitPrice",
            LineField::Unit => "unit",
            LineField::DiscountPercent => "discount",
        }
    }

    /// Text fields are stored verbatim; every other field is numeric.
    pub fn is_text(self) -> bool {
        matches!(self, LineField::ProductCode | LineField::Unit)
    }
}

impl FromStr for LineField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "productCode" => Ok(LineField::ProductCode),
            "qty" | "quantity" => Ok(LineField::Quantity),
            "weight" => Ok(LineField::Weight),
            "unitPrice" => Ok(LineField::UnitPrice),
            "unit" => Ok(LineField::Unit),
            "discount" | "discountPercent" => Ok(LineField::DiscountPercent),
            "number" | "finalPrice" => Err(DomainError::validation(format!(
                "line item field '{s}' is derived and cannot be set"
            ))),
            other => Err(DomainError::unknown_field("line item", other)),
        }
    }
}

impl core::fmt::Display for LineField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One invoice row.
///
/// Fields are private so `final_price` can only change through a write that
/// also recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LineItemRecord")]
pub struct LineItem {
    #[serde(rename = "number")]
    sequence_number: u32,
    #[serde(rename = "productCode")]
    product_code: String,
    #[serde(rename = "qty")]
    quantity: f64,
    weight: f64,
    #[serde(rename = "unitPrice")]
    unit_price: f64,
    unit: Unit,
    #[serde(rename = "discount")]
    discount_percent: f64,
    #[serde(rename = "finalPrice")]
    final_price: f64,
}

impl LineItem {
    /// A blank row at the given 1-based position.
    pub fn new(sequence_number: u32) -> Self {
        Self {
            sequence_number,
            product_code: String::new(),
            quantity: 0.0,
            weight: 0.0,
            unit_price: 0.0,
            unit: Unit::Unspecified,
            discount_percent: 0.0,
            final_price: 0.0,
        }
    }

    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn discount_percent(&self) -> f64 {
        self.discount_percent
    }

    /// `unit_price * quantity` less the percentage discount.
    pub fn final_price(&self) -> f64 {
        self.final_price
    }

    /// `unit_price * quantity`, before any discount.
    pub fn price_before_discount(&self) -> f64 {
        self.unit_price * self.quantity
    }

    /// Discounted unit price times quantity, as accumulated into the net total.
    pub fn net_amount(&self) -> f64 {
        (self.unit_price - self.unit_price * self.discount_percent / 100.0) * self.quantity
    }

    /// Store raw input into `field`, then recompute `final_price`.
    pub(crate) fn set_field(&mut self, field: LineField, raw: &str) {
        if field.is_text() {
            match field {
                LineField::Unit => self.unit = Unit::from(raw),
                _ => self.product_code = raw.to_string(),
            }
        } else {
            let value = coerce_number(raw);
            match field {
                LineField::Quantity => self.quantity = value,
                LineField::Weight => self.weight = value,
                LineField::UnitPrice => self.unit_price = value,
                _ => self.discount_percent = value,
            }
        }
        self.recompute();
    }

    pub(crate) fn renumber(&mut self, sequence_number: u32) {
        self.sequence_number = sequence_number;
    }

    fn recompute(&mut self) {
        let before = self.price_before_discount();
        self.final_price = before - before * self.discount_percent / 100.0;
    }
}

/// Persisted shape of a line item. The stored `finalPrice` is read but never
/// trusted; it is recomputed from the other fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LineItemRecord {
    number: u32,
    #[serde(rename = "productCode")]
    product_code: String,
    qty: f64,
    weight: f64,
    #[serde(rename = "unitPrice")]
    unit_price: f64,
    unit: Unit,
    discount: f64,
}

impl From<LineItemRecord> for LineItem {
    fn from(r: LineItemRecord) -> Self {
        let mut item = LineItem {
            sequence_number: r.number,
            product_code: r.product_code,
            quantity: r.qty,
            weight: r.weight,
            unit_price: r.unit_price,
            unit: r.unit,
            discount_percent: r.discount,
            final_price: 0.0,
        };
        item.recompute();
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_write_recomputes_final_price() {
        let mut item = LineItem::new(1);
        item.set_field(LineField::UnitPrice, "100");
        item.set_field(LineField::Quantity, "2");
        assert_eq!(item.final_price(), 200.0);

        item.set_field(LineField::DiscountPercent, "10");
        assert_eq!(item.final_price(), 180.0);
        assert_eq!(item.price_before_discount(), 200.0);
    }

    #[test]
    fn invalid_numeric_input_stores_zero_not_previous_value() {
        let mut item = LineItem::new(1);
        item.set_field(LineField::Quantity, "5");
        item.set_field(LineField::Quantity, "abc");
        assert_eq!(item.quantity(), 0.0);
    }

    #[test]
    fn text_fields_are_stored_verbatim_and_leave_price_alone() {
        let mut item = LineItem::new(1);
        item.set_field(LineField::UnitPrice, "10");
        item.set_field(LineField::Quantity, "3");
        let price = item.final_price();

        item.set_field(LineField::ProductCode, "  P-001 ");
        item.set_field(LineField::Unit, "กิโลกรัม");
        assert_eq!(item.product_code(), "  P-001 ");
        assert_eq!(item.unit(), &Unit::Kilogram);
        assert_eq!(item.final_price(), price);
    }

    #[test]
    fn weight_does_not_affect_price() {
        let mut item = LineItem::new(1);
        item.set_field(LineField::UnitPrice, "10");
        item.set_field(LineField::Quantity, "3");
        item.set_field(LineField::Weight, "99.5");
        assert_eq!(item.weight(), 99.5);
        assert_eq!(item.final_price(), 30.0);
    }

    #[test]
    fn every_field_write_lands_in_its_own_slot() {
        let mut item = LineItem::new(1);
        for (i, field) in LineField::ALL.into_iter().enumerate() {
            item.set_field(field, &format!("{}", i + 1));
        }
        assert_eq!(item.product_code(), "1");
        assert_eq!(item.quantity(), 2.0);
        assert_eq!(item.weight(), 3.0);
        assert_eq!(item.unit_price(), 4.0);
        assert_eq!(item.unit(), &Unit::Other("5".to_string()));
        assert_eq!(item.discount_percent(), 6.0);
    }

    #[test]
    fn only_product_code_and_unit_are_text() {
        let text: Vec<LineField> = LineField::ALL.into_iter().filter(|f| f.is_text()).collect();
        assert_eq!(text, vec![LineField::ProductCode, LineField::Unit]);
    }

    #[test]
    fn unknown_unit_text_is_kept() {
        let unit = Unit::from("box");
        assert_eq!(unit, Unit::Other("box".to_string()));
        assert_eq!(String::from(unit), "box");
        assert_eq!(String::from(Unit::Piece), "ชิ้น");
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("qty".parse::<LineField>().unwrap(), LineField::Quantity);
        assert_eq!(
            "discount".parse::<LineField>().unwrap(),
            LineField::DiscountPercent
        );
        for field in LineField::ALL {
            assert_eq!(field.name().parse::<LineField>().unwrap(), field);
        }

        match "finalPrice".parse::<LineField>() {
            Err(DomainError::Validation(msg)) if msg.contains("derived") => {}
            other => panic!("expected validation error, got {other:?}"),
        }
        match "colour".parse::<LineField>() {
            Err(DomainError::UnknownField { name, .. }) if name == "colour" => {}
            other => panic!("expected unknown field error, got {other:?}"),
        }
    }

    #[test]
    fn deserialization_recomputes_stale_final_price() {
        let json = r#"{"number":3,"productCode":"A1","qty":2,"weight":1.5,
            "unitPrice":100,"unit":"ชิ้น","discount":10,"finalPrice":9999}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.sequence_number(), 3);
        assert_eq!(item.unit(), &Unit::Piece);
        assert_eq!(item.final_price(), 180.0);
    }

    #[test]
    fn serializes_with_form_field_names() {
        let mut item = LineItem::new(1);
        item.set_field(LineField::Quantity, "2");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["number"], 1);
        assert_eq!(value["qty"], 2.0);
        assert_eq!(value["unit"], "");
        assert_eq!(value["finalPrice"], 0.0);
    }
}
