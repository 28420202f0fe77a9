#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod submission_tests;

#[cfg(test)]
mod public_tests;

#[cfg(test)]
mod admin_crud_tests;

#[cfg(test)]
mod export_tests;

#[cfg(test)]
mod upload_tests;

#[cfg(test)]
mod notify_tests;

#[cfg(test)]
mod webhook_tests;

#[cfg(test)]
mod rate_limit_tests;
