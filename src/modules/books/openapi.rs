use serde_json::{json, Value};

fn failure(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Failure" }
            }
        }
    })
}

fn success(description: &str, data: Option<Value>) -> Value {
    let mut properties = json!({
        "status": { "type": "string", "enum": ["success"] },
        "message": { "type": "string" }
    });
    if let Some(data) = data {
        properties["data"] = data;
    }
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "type": "object", "properties": properties, "required": ["status"] }
            }
        }
    })
}

fn book_id_parameter() -> Value {
    json!({
        "name": "bookId",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    })
}

fn flag_parameter(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": description,
        "schema": { "type": "string" }
    })
}

fn payload_body() -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookPayload" }
            }
        }
    })
}

/// OpenAPI fragment for the books module, paths relative to its mount point.
pub fn fragment() -> Value {
    json!({
        "paths": {
            "/": {
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": payload_body(),
                    "responses": {
                        "201": success("Book added", Some(json!({
                            "type": "object",
                            "properties": { "bookId": { "type": "string" } }
                        }))),
                        "400": failure("Missing name or readPage greater than pageCount")
                    }
                },
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "parameters": [
                        {
                            "name": "name",
                            "in": "query",
                            "required": false,
                            "description": "Case-insensitive substring of the book name",
                            "schema": { "type": "string" }
                        },
                        flag_parameter("reading", "\"1\" for books being read, any other value for the rest"),
                        flag_parameter("finished", "\"1\" for finished books, any other value for the rest")
                    ],
                    "responses": {
                        "200": success("Matching books", Some(json!({
                            "type": "object",
                            "properties": {
                                "books": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/BookSummary" }
                                }
                            }
                        })))
                    }
                }
            },
            "/{bookId}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "responses": {
                        "200": success("The book", Some(json!({
                            "type": "object",
                            "properties": { "book": { "$ref": "#/components/schemas/Book" } }
                        }))),
                        "404": failure("Book not found")
                    }
                },
                "put": {
                    "summary": "Update a book",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "requestBody": payload_body(),
                    "responses": {
                        "200": success("Book updated", None),
                        "400": failure("Missing name or readPage greater than pageCount"),
                        "404": failure("Book not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "responses": {
                        "200": success("Book deleted", None),
                        "404": failure("Book not found")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Books health check",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "year": { "type": ["integer", "null"] },
                        "author": { "type": ["string", "null"] },
                        "summary": { "type": ["string", "null"] },
                        "publisher": { "type": ["string", "null"] },
                        "pageCount": { "type": "integer", "minimum": 0 },
                        "readPage": { "type": "integer", "minimum": 0 },
                        "finished": { "type": "boolean" },
                        "reading": { "type": "boolean" },
                        "insertedAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    },
                    "required": [
                        "id", "name", "pageCount", "readPage", "finished",
                        "reading", "insertedAt", "updatedAt"
                    ]
                },
                "BookPayload": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "year": { "type": "integer" },
                        "author": { "type": "string" },
                        "summary": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer", "minimum": 0 },
                        "readPage": { "type": "integer", "minimum": 0 },
                        "reading": { "type": "boolean" }
                    },
                    "required": ["name"]
                },
                "BookSummary": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "publisher": { "type": ["string", "null"] }
                    },
                    "required": ["id", "name"]
                }
            }
        }
    })
}
