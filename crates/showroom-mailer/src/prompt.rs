//! Sales prompt construction: product catalog, tone and length knobs.

use std::fmt::Write as _;

use showroom_model::Customer;

use crate::GenerationError;

/// One item of the clothing catalog the email recommends from.
#[derive(Debug, Clone, Copy)]
pub struct Product {
    /// Product name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Price in currency units.
    pub price: f64,
}

const PRODUCTS: &[Product] = &[
    Product {
        name: "T-shirt",
        description: "A plain white t-shirt made of 100% cotton.",
        price: 10.99,
    },
    Product {
        name: "Jeans",
        description: "A pair of blue denim jeans with a straight leg fit.",
        price: 24.99,
    },
    Product {
        name: "Hoodie",
        description: "A black hoodie made of a cotton and polyester blend.",
        price: 34.99,
    },
    Product {
        name: "Cardigan",
        description: "A grey cardigan with a V-neck and long sleeves.",
        price: 36.99,
    },
    Product {
        name: "Joggers",
        description: "A pair of black joggers made of a cotton and polyester blend.",
        price: 44.99,
    },
    Product {
        name: "Dress",
        description: "A black dress made of 100% polyester.",
        price: 49.99,
    },
    Product {
        name: "Jacket",
        description: "A navy blue jacket made of 100% cotton.",
        price: 55.99,
    },
    Product {
        name: "Skirt",
        description: "A brown skirt made of a cotton and polyester blend.",
        price: 29.99,
    },
    Product {
        name: "Shorts",
        description: "A pair of black shorts made of a cotton and polyester blend.",
        price: 19.99,
    },
    Product {
        name: "Sweater",
        description: "A white sweater with a crew neck and long sleeves.",
        price: 39.99,
    },
];

/// The full catalog, in fixed order.
#[must_use]
pub fn product_catalog() -> &'static [Product] {
    PRODUCTS
}

/// Everything the generation needs: the target customer plus the
/// tone/length knobs exposed by the UI.
#[derive(Debug, Clone)]
pub struct PromptContext {
    /// Target record; `None` means the user has not selected one yet.
    pub customer: Option<Customer>,
    /// Free-form tone selector ("😊 Formal", "😉 Casual", ...).
    pub tone: String,
    /// Requested email length in characters.
    pub length: usize,
}

impl PromptContext {
    /// Context for a selected customer with default knobs.
    #[must_use]
    pub fn for_customer(customer: Customer) -> Self {
        Self {
            customer: Some(customer),
            tone: "😊 Formal".to_string(),
            length: 1000,
        }
    }

    /// Render `(system prompt, user prompt)`.
    ///
    /// # Errors
    /// [`GenerationError::MissingCustomer`] when no customer is set.
    pub fn prompts(&self) -> Result<(String, String), GenerationError> {
        let customer = self
            .customer
            .as_ref()
            .ok_or(GenerationError::MissingCustomer)?;

        let system = format!(
            "You are a salesperson at Showroom, a company that sells clothing. \
             You have a list of products and customer data. Your task is to write \
             a sales email to a customer recommending one of the products. The \
             email should be personalized and include a recommendation based on \
             the customer's data. The email should be {} and {} characters long.",
            self.tone, self.length
        );

        let mut catalog = String::new();
        for product in PRODUCTS {
            let _ = writeln!(
                catalog,
                "- {} (${:.2}): {}",
                product.name, product.price, product.description
            );
        }

        let user = format!(
            "Based on these products:\n{catalog}\
             write a sales email to {name} and email {email} who is {age} years \
             old and a {gender} gender. {name} lives in {location} and works as \
             a {job} and earns {salary} per year. Make sure the email recommends \
             one product only and is personalized to {name}. The company is \
             named Showroom.",
            name = customer.customer_name,
            email = customer.email,
            age = customer.age,
            gender = customer.gender,
            location = customer.location,
            job = customer.job,
            salary = customer.salary,
        );

        Ok((system, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_require_a_customer() {
        let ctx = PromptContext {
            customer: None,
            tone: "😊 Formal".to_string(),
            length: 500,
        };
        assert!(matches!(
            ctx.prompts(),
            Err(GenerationError::MissingCustomer)
        ));
    }

    #[test]
    fn prompts_carry_customer_tone_and_length() {
        let customer = Customer {
            customer_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            age: 34,
            gender: "Female".to_string(),
            location: "Lisbon".to_string(),
            job: "Engineer".to_string(),
            salary: 72_000,
            ..Customer::default()
        };
        let mut ctx = PromptContext::for_customer(customer);
        ctx.tone = "😉 Casual".to_string();
        ctx.length = 750;

        let (system, user) = ctx.prompts().expect("customer is set");
        assert!(system.contains("😉 Casual"));
        assert!(system.contains("750 characters"));
        assert!(user.contains("Jane Doe"));
        assert!(user.contains("jane@example.com"));
        assert!(user.contains("T-shirt"));
    }
}
