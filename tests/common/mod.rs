use serde_json::{json, Value};
use swagmodel::Api;

/// A resolved Petstore-shaped Swagger 2.0 document (no `$ref` entries).
pub fn petstore_document() -> Value {
    json!({
        "swagger": "2.0",
        "info": {"title": "Swagger Petstore", "version": "1.0.0"},
        "host": "petstore.example.com",
        "basePath": "/v2",
        "schemes": ["http"],
        "securityDefinitions": {
            "petstore_auth": {
                "type": "oauth2",
                "authorizationUrl": "http://petstore.example.com/oauth/dialog",
                "flow": "implicit",
                "scopes": {
                    "read:pets": "read your pets",
                    "write:pets": "modify pets in your account"
                }
            },
            "api_key": {"type": "apiKey", "name": "api_key", "in": "header"}
        },
        "paths": {
            "/pet": {
                "post": {
                    "tags": ["pet"],
                    "operationId": "addPet",
                    "consumes": ["application/json", "application/xml"],
                    "produces": ["application/xml", "application/json"],
                    "parameters": [
                        {
                            "in": "body",
                            "name": "body",
                            "required": true,
                            "schema": pet_schema()
                        }
                    ],
                    "responses": {
                        "405": {"description": "Invalid input"}
                    },
                    "security": [{"petstore_auth": ["write:pets", "read:pets"]}]
                }
            },
            "/pet/findByStatus": {
                "get": {
                    "tags": ["pet"],
                    "operationId": "findPetsByStatus",
                    "produces": ["application/json"],
                    "parameters": [
                        {
                            "name": "status",
                            "in": "query",
                            "required": false,
                            "type": "array",
                            "items": {"type": "string"},
                            "collectionFormat": "csv",
                            "default": ["available"]
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "successful operation",
                            "schema": {"type": "array", "items": pet_schema()}
                        },
                        "default": {"description": "unexpected error"}
                    }
                }
            },
            "/pet/findByTags": {
                "get": {
                    "tags": ["pet"],
                    "operationId": "findPetsByTags",
                    "produces": ["application/json"],
                    "parameters": [
                        {
                            "name": "tags",
                            "in": "query",
                            "required": false,
                            "type": "array",
                            "items": {"type": "string"},
                            "collectionFormat": "multi"
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "successful operation",
                            "schema": {"type": "array", "items": pet_schema()}
                        }
                    }
                }
            },
            "/pet/{petId}": {
                "get": {
                    "tags": ["pet"],
                    "operationId": "getPetById",
                    "produces": ["application/xml", "application/json"],
                    "parameters": [
                        {
                            "name": "petId",
                            "in": "path",
                            "required": true,
                            "type": "integer",
                            "format": "int64"
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "successful operation",
                            "schema": pet_schema(),
                            "headers": {
                                "X-Rate-Limit": {
                                    "type": "integer",
                                    "description": "calls per hour allowed"
                                }
                            }
                        },
                        "404": {"description": "Pet not found"}
                    },
                    "security": [{"petstore_auth": ["read:pets", "write:pets"]}]
                },
                "delete": {
                    "tags": ["pet"],
                    "operationId": "deletePet",
                    "parameters": [
                        {
                            "name": "petId",
                            "in": "path",
                            "required": true,
                            "type": "integer",
                            "format": "int64"
                        },
                        {
                            "name": "api_key",
                            "in": "header",
                            "required": false,
                            "type": "string"
                        }
                    ],
                    "responses": {
                        "204": {"description": "pet deleted", "schema": pet_schema()}
                    }
                }
            },
            "/pet/{petId}/uploadImage": {
                "post": {
                    "tags": ["pet"],
                    "operationId": "uploadFile",
                    "consumes": ["multipart/form-data"],
                    "produces": ["application/json"],
                    "parameters": [
                        {
                            "name": "petId",
                            "in": "path",
                            "required": true,
                            "type": "integer",
                            "format": "int64"
                        },
                        {
                            "name": "additionalMetadata",
                            "in": "formData",
                            "required": false,
                            "type": "string"
                        },
                        {
                            "name": "file",
                            "in": "formData",
                            "required": false,
                            "type": "file"
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "successful operation",
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "code": {"type": "integer"},
                                    "message": {"type": "string"}
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// The Pet definition, inlined wherever the document references it.
///
/// `required` lists `photoUrls` before `name` so missing-property errors
/// surface in that order.
pub fn pet_schema() -> Value {
    json!({
        "type": "object",
        "required": ["photoUrls", "name"],
        "properties": {
            "id": {"type": "integer", "format": "int64"},
            "name": {"type": "string"},
            "photoUrls": {"type": "array", "items": {"type": "string"}},
            "status": {"type": "string", "enum": ["available", "pending", "sold"]}
        }
    })
}

pub fn petstore_api() -> Api {
    Api::from_document(petstore_document()).expect("failed to build petstore model")
}

pub fn valid_pet() -> Value {
    json!({"id": 1, "name": "odie", "photoUrls": []})
}
