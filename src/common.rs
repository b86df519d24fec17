/// Price in the smallest currency unit (pennies, cents)
pub type Price = i64;
/// Quantity of the traded good (e.g. kilograms)
pub type Quantity = f64;
pub type UserId = String;
