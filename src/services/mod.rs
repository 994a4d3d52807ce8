pub mod ocr;
pub mod places;
