pub mod authors;
pub mod books;
pub mod users;

use stacks_kernel::ModuleRegistry;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(authors::create_module());
    registry.register(books::create_module());
    registry.register(users::create_module());
}
