use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::NewProduct;
use crate::domain::types::{
    AffiliateLink, CategoryName, ImageSource, ImageUrl, NumericInput, ProductPrice, ProductRating,
    ProductTitle, TypeConstraintError,
};

/// How the add-product form picks its category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMode {
    #[default]
    Existing,
    New,
}

#[derive(Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub price: String,
    #[validate(length(min = 1))]
    pub image_url: String,
    #[validate(url)]
    pub affiliate_link: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub category_mode: CategoryMode,
    #[serde(default)]
    pub existing_category: String,
    #[serde(default)]
    pub new_category: String,
}

/// JSON body accepted by the product creation API. Numbers may arrive as
/// strings.
#[derive(Deserialize, Validate)]
pub struct ApiProductForm {
    #[validate(length(min = 1))]
    pub title: String,
    pub price: NumericInput,
    #[validate(length(min = 1))]
    pub image_url: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(url)]
    pub affiliate_link: String,
    #[serde(default)]
    pub rating: Option<NumericInput>,
}

/// Validated product data ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AddProductFormPayload {
    pub title: ProductTitle,
    pub price: ProductPrice,
    pub image_url: ImageSource,
    pub category: CategoryName,
    pub affiliate_link: AffiliateLink,
    pub rating: Option<ProductRating>,
}

impl AddProductFormPayload {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            title: self.title,
            price: self.price,
            image_url: self.image_url,
            category: self.category,
            affiliate_link: self.affiliate_link,
            rating: self.rating,
        }
    }
}

/// Every listed image must be an absolute URL.
fn parse_images(value: String) -> Result<ImageSource, TypeConstraintError> {
    let source = ImageSource::new(value)?;
    for url in source.urls() {
        ImageUrl::new(url)?;
    }
    Ok(source)
}

/// Blank ratings mean "unrated".
fn parse_rating(value: Option<NumericInput>) -> Result<Option<ProductRating>, TypeConstraintError> {
    match value {
        Some(input) if !input.is_blank() => Ok(Some(ProductRating::try_from(input)?)),
        _ => Ok(None),
    }
}

#[derive(Debug, Error)]
pub enum AddProductFormError {
    #[error("Add product form validation failed: {0}")]
    Validation(String),
    #[error("Add product form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Pick an existing category or enter a new one")]
    MissingCategory,
}

impl From<ValidationErrors> for AddProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddProductForm> for AddProductFormPayload {
    type Error = AddProductFormError;

    fn try_from(value: AddProductForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let category = match value.category_mode {
            CategoryMode::Existing => value.existing_category,
            CategoryMode::New => value.new_category,
        };
        let category =
            CategoryName::new(category).map_err(|_| AddProductFormError::MissingCategory)?;

        Ok(Self {
            title: ProductTitle::new(value.title)?,
            price: ProductPrice::try_from(NumericInput::Text(value.price))?,
            image_url: parse_images(value.image_url)?,
            category,
            affiliate_link: AffiliateLink::new(value.affiliate_link)?,
            rating: parse_rating(Some(NumericInput::Text(value.rating)))?,
        })
    }
}

#[derive(Debug, Error)]
pub enum ApiProductFormError {
    #[error("Product payload validation failed: {0}")]
    Validation(String),
    #[error("Product payload contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ApiProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ApiProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ApiProductForm> for AddProductFormPayload {
    type Error = ApiProductFormError;

    fn try_from(value: ApiProductForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            title: ProductTitle::new(value.title)?,
            price: ProductPrice::try_from(value.price)?,
            image_url: parse_images(value.image_url)?,
            category: CategoryName::new(value.category)?,
            affiliate_link: AffiliateLink::new(value.affiliate_link)?,
            rating: parse_rating(value.rating)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> AddProductForm {
        AddProductForm {
            title: "Test".to_string(),
            price: "199.99".to_string(),
            image_url: "http://x/1.jpg".to_string(),
            affiliate_link: "http://x".to_string(),
            rating: String::new(),
            category_mode: CategoryMode::New,
            existing_category: "Mobiles".to_string(),
            new_category: " New Gear ".to_string(),
        }
    }

    #[test]
    fn coerces_numbers_and_picks_new_category() {
        let payload: AddProductFormPayload = sample_form().try_into().unwrap();
        assert_eq!(payload.price, 199.99);
        assert_eq!(payload.category.as_str(), "New Gear");
        assert_eq!(payload.rating, None);
    }

    #[test]
    fn existing_mode_uses_selected_category() {
        let mut form = sample_form();
        form.category_mode = CategoryMode::Existing;
        form.rating = "4.5".to_string();

        let payload: AddProductFormPayload = form.try_into().unwrap();
        assert_eq!(payload.category.as_str(), "Mobiles");
        assert_eq!(payload.rating.map(ProductRating::get), Some(4.5));
    }

    #[test]
    fn rejects_missing_category() {
        let mut form = sample_form();
        form.new_category = "   ".to_string();

        let result: Result<AddProductFormPayload, _> = form.try_into();
        assert!(matches!(result, Err(AddProductFormError::MissingCategory)));
    }

    #[test]
    fn rejects_bad_numbers_and_ratings() {
        let mut form = sample_form();
        form.price = "cheap".to_string();
        let result: Result<AddProductFormPayload, _> = form.try_into();
        assert!(matches!(result, Err(AddProductFormError::TypeConstraint(_))));

        let mut form = sample_form();
        form.rating = "7".to_string();
        let result: Result<AddProductFormPayload, _> = form.try_into();
        assert!(matches!(result, Err(AddProductFormError::TypeConstraint(_))));
    }

    #[test]
    fn rejects_blank_title_and_invalid_images() {
        let mut form = sample_form();
        form.title = String::new();
        let result: Result<AddProductFormPayload, _> = form.try_into();
        assert!(matches!(result, Err(AddProductFormError::Validation(_))));

        let mut form = sample_form();
        form.image_url = "http://x/1.jpg, not a url".to_string();
        let result: Result<AddProductFormPayload, _> = form.try_into();
        assert!(matches!(result, Err(AddProductFormError::TypeConstraint(_))));
    }

    #[test]
    fn api_form_accepts_numeric_strings() {
        let form: ApiProductForm = serde_json::from_str(
            r#"{
                "title": "Speaker",
                "price": "1499",
                "image_url": "https://img.example.com/s.jpg",
                "category": "Audio",
                "affiliate_link": "https://www.amazon.in/dp/s",
                "rating": 4
            }"#,
        )
        .unwrap();

        let payload: AddProductFormPayload = form.try_into().unwrap();
        assert_eq!(payload.price, 1499.0);
        assert_eq!(payload.rating.map(ProductRating::get), Some(4.0));
    }

    #[test]
    fn api_form_treats_blank_rating_as_unrated() {
        let form: ApiProductForm = serde_json::from_str(
            r#"{
                "title": "Speaker",
                "price": 10,
                "image_url": "https://img.example.com/s.jpg",
                "category": "Audio",
                "affiliate_link": "https://www.amazon.in/dp/s",
                "rating": " "
            }"#,
        )
        .unwrap();

        let payload: AddProductFormPayload = form.try_into().unwrap();
        assert_eq!(payload.rating, None);
    }
}
