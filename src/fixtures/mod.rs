//! Fixtures
//!
//! Named YAML fixture sets for tests and demos: a product catalog and a
//! member roster per set, loaded from `fixtures/products/<name>.yml` and
//! `fixtures/members/<name>.yml`.

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::catalog::{Catalog, Member, MemberId, Product, ProductId};

pub mod members;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A price was negative
    #[error("Invalid price: {0}")]
    InvalidPrice(i64),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    /// Member not found
    #[error("Member not found: {0}")]
    MemberNotFound(u64),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog built from the loaded files
    catalog: Catalog,
}

impl Fixture {
    /// Creates a new empty fixture with the default base path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Creates a new empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
        }
    }

    /// Loads products from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a price
    /// is negative.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        for product_fixture in fixture.products {
            let product: Product = product_fixture.try_into()?;
            self.catalog.insert_product(product);
        }

        Ok(self)
    }

    /// Loads members from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_members(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("members").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: members::MembersFixture = serde_norway::from_str(&contents)?;

        for member_fixture in fixture.members {
            self.catalog.insert_member(member_fixture.into());
        }

        Ok(self)
    }

    /// Loads a complete fixture set (products and members with the same
    /// name).
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_members(name)?;

        Ok(fixture)
    }

    /// The loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Consumes the fixture, returning the catalog.
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Gets a product by its backend id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: u64) -> Result<&Product, FixtureError> {
        self.catalog
            .product(ProductId(id))
            .ok_or(FixtureError::ProductNotFound(id))
    }

    /// Gets a member by its backend id.
    ///
    /// # Errors
    ///
    /// Returns an error if the member is not found.
    pub fn member(&self, id: u64) -> Result<&Member, FixtureError> {
        self.catalog
            .member(MemberId(id))
            .ok_or(FixtureError::MemberNotFound(id))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
