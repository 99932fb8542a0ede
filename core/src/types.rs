//! Records and payloads for the demo API collections.
//!
//! # Design
//! Each collection gets its own record, create payload and update payload.
//! Record fields other than `id` default when absent because create
//! responses from the demo API echo only what was submitted. Update payloads
//! skip unset fields so the server keeps their previous values.

use serde::{Deserialize, Serialize};

use crate::resource::{require_text, require_text_if_set, Record, Resource};

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comments;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub post_id: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<CommentAuthor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub body: String,
    pub post_id: u64,
    pub user_id: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateComment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Record for Comment {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Comments {
    const NAME: &'static str = "comments";
    const CREATE_PATH: &'static str = "comments/add";

    type Record = Comment;
    type Create = CreateComment;
    type Update = UpdateComment;

    fn validate_create(input: &CreateComment) -> Result<(), String> {
        require_text("body", &input.body)
    }

    fn validate_update(input: &UpdateComment) -> Result<(), String> {
        require_text_if_set("body", input.body.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Products;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateProduct {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
}

impl Record for Product {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Products {
    const NAME: &'static str = "products";
    const CREATE_PATH: &'static str = "products/add";

    type Record = Product;
    type Create = CreateProduct;
    type Update = UpdateProduct;

    fn validate_create(input: &CreateProduct) -> Result<(), String> {
        require_text("title", &input.title)
    }

    fn validate_update(input: &UpdateProduct) -> Result<(), String> {
        require_text_if_set("title", input.title.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipes;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateRecipe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl Record for Recipe {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Recipes {
    const NAME: &'static str = "recipes";
    const CREATE_PATH: &'static str = "recipes/add";

    type Record = Recipe;
    type Create = CreateRecipe;
    type Update = UpdateRecipe;

    fn validate_create(input: &CreateRecipe) -> Result<(), String> {
        require_text("name", &input.name)
    }

    fn validate_update(input: &UpdateRecipe) -> Result<(), String> {
        require_text_if_set("name", input.name.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posts;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatePost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Record for Post {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Posts {
    const NAME: &'static str = "posts";
    const CREATE_PATH: &'static str = "posts/add";

    type Record = Post;
    type Create = CreatePost;
    type Update = UpdatePost;

    fn validate_create(input: &CreatePost) -> Result<(), String> {
        require_text("title", &input.title)
    }

    fn validate_update(input: &UpdatePost) -> Result<(), String> {
        require_text_if_set("title", input.title.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Todos;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    #[serde(default)]
    pub todo: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub user_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub todo: String,
    #[serde(default)]
    pub completed: bool,
    pub user_id: u64,
}

/// Only the fields present in the JSON are applied; omitted fields remain
/// unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Record for Todo {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Todos {
    const NAME: &'static str = "todos";
    const CREATE_PATH: &'static str = "todos/add";

    type Record = Todo;
    type Create = CreateTodo;
    type Update = UpdateTodo;

    fn validate_create(input: &CreateTodo) -> Result<(), String> {
        require_text("todo", &input.todo)
    }

    fn validate_update(input: &UpdateTodo) -> Result<(), String> {
        require_text_if_set("todo", input.todo.as_deref())
    }
}
