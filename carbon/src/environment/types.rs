use carbon_core_contact_impl::{
    notification::ContactNotificationServiceImpl, submission::ContactSubmissionServiceImpl,
    ContactFeatureServiceImpl,
};
use carbon_email_impl::EmailServiceImpl;
use carbon_persistence_postgres::{
    contact::PostgresContactSubmissionRepository, PostgresDatabase,
};
use carbon_shared_impl::{IdServiceImpl, TimeServiceImpl};

// API
pub type RestServer = carbon_api_rest::RestServer<ContactFeature>;

// Persistence
pub type Database = PostgresDatabase;
pub type ContactSubmissionRepo = PostgresContactSubmissionRepository;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type Id = IdServiceImpl;
pub type Time = TimeServiceImpl;

// Core
pub type ContactFeature =
    ContactFeatureServiceImpl<Database, ContactSubmission, ContactNotification, ContactSubmissionRepo>;
pub type ContactSubmission = ContactSubmissionServiceImpl<Id, Time, ContactSubmissionRepo>;
pub type ContactNotification = ContactNotificationServiceImpl<Email>;
