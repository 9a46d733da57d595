use anyhow::Context;
use noop_graph::{
    Clazz, Comment, Controller, ControllerConfig, EdgeType, ElementKind, Library, Method,
    NewEdgeOperation, NewElementOperation, Parameter, Project, RootOperation, SharedController,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Noop Graph v{}", noop_graph::version());
    println!("==========================================");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => ControllerConfig::from_file(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => ControllerConfig::default(),
    };

    let controller = SharedController::new(Controller::with_config(config));
    build_standard_library(&controller).await?;
    summarize(&controller).await;

    let history = controller.get_history().await;
    println!("\nHistory ({} operations):", history.len());
    println!("{}", serde_json::to_string_pretty(&history)?);

    Ok(())
}

/// Construct the standard library as an ordinary client of the controller
async fn build_standard_library(controller: &SharedController) -> anyhow::Result<()> {
    println!("=== Standard Library ===");
    let author = std::env::var("USER").unwrap_or_else(|_| "noop".to_string());

    let project = Project::new("Noop", "com.google.noop", "Apache 2");
    let p = project.id;
    controller.submit(RootOperation::new(project), &author).await?;

    let lang = Library::new("lang");
    let io = Library::new("io");
    let (lang_id, io_id) = (lang.id, io.id);
    controller.submit(NewElementOperation::new(lang, p), &author).await?;
    controller.submit(NewElementOperation::new(io, p), &author).await?;

    let string = Clazz::new("String");
    let void = Clazz::new("Void");
    let boolean = Clazz::new("Boolean");
    let integer = Clazz::new("Integer");
    let console = Clazz::new("Console");
    let (string_id, void_id, boolean_id, int_id, console_id) =
        (string.id, void.id, boolean.id, integer.id, console.id);
    for clazz in [string, void, boolean, integer] {
        controller.submit(NewElementOperation::new(clazz, lang_id), &author).await?;
    }
    controller.submit(NewElementOperation::new(console, io_id), &author).await?;
    println!("✓ Libraries lang, io with 5 classes");

    let print = Method::new("print");
    let print_id = print.id;
    controller
        .submit(
            NewElementOperation::new(print, console_id).with_edge(EdgeType::TypeOf, void_id),
            &author,
        )
        .await?;
    controller
        .submit(
            NewElementOperation::new(Parameter::new("s"), print_id)
                .with_edge(EdgeType::TypeOf, string_id),
            &author,
        )
        .await?;
    println!("✓ Console.print(s: String): Void");

    let plus = Method::new("+");
    let plus_id = plus.id;
    controller.submit(NewElementOperation::new(plus, int_id), &author).await?;
    controller
        .submit(NewEdgeOperation::new(plus_id, EdgeType::TypeOf, int_id), &author)
        .await?;
    controller
        .submit(
            NewElementOperation::new(Parameter::new("i"), plus_id)
                .with_edge(EdgeType::TypeOf, int_id),
            &author,
        )
        .await?;
    controller
        .submit(
            NewElementOperation::new(
                Comment::new(
                    "Elements may have symbols in their names. Tools may choose to render this as infix",
                    author.as_str(),
                ),
                int_id,
            ),
            &author,
        )
        .await?;
    controller
        .submit(
            NewElementOperation::new(Method::new("=="), int_id)
                .with_edge(EdgeType::TypeOf, boolean_id),
            &author,
        )
        .await?;
    println!("✓ Integer.+(i: Integer): Integer, Integer.==: Boolean");

    Ok(())
}

async fn summarize(controller: &SharedController) {
    controller
        .read(|c| {
            let store = c.store();
            println!("\nGraph Statistics:");
            println!("  Total elements: {}", store.len());
            println!("  Total edges: {}", store.edge_count());
            if let Some(root) = store.root() {
                for library in store.children_of_kind(root.id(), ElementKind::Library) {
                    let classes = store.children_of_kind(library.id(), ElementKind::Clazz);
                    let names: Vec<_> = classes.iter().map(|clazz| clazz.name()).collect();
                    println!("  {}: {}", library.name(), names.join(", "));
                }
            }
        })
        .await;
}
