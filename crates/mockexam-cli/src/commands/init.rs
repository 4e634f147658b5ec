//! The `mockexam init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mockexam.toml").exists() {
        println!("mockexam.toml already exists, skipping.");
    } else {
        std::fs::write("mockexam.toml", SAMPLE_CONFIG)?;
        println!("Created mockexam.toml");
    }

    let bank_path = std::path::Path::new("questions.json");
    if bank_path.exists() {
        println!("questions.json already exists, skipping.");
    } else {
        std::fs::write(bank_path, EXAMPLE_BANK)?;
        println!("Created questions.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to questions.json");
    println!("  2. Run: mockexam validate --bank questions.json");
    println!("  3. Run: mockexam run --bank questions.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mockexam configuration

# Questions sampled per exam (a smaller bank shortens the exam)
total_questions = 40

# Exam length in seconds
exam_duration_secs = 7200
"#;

const EXAMPLE_BANK: &str = r#"[
  {
    "question": "Which Azure service provides a managed Kubernetes control plane?",
    "options": ["Azure Kubernetes Service", "Azure Container Instances", "Azure App Service", "Azure Batch"],
    "answer": "Azure Kubernetes Service"
  },
  {
    "question": "Which built-in role can manage all resources but cannot grant access to others?",
    "options": ["Owner", "Contributor", "Reader", "User Access Administrator"],
    "answer": "Contributor"
  },
  {
    "question": "Which storage redundancy option replicates data to a secondary region?",
    "options": ["LRS", "ZRS", "GRS"],
    "answer": "GRS"
  },
  {
    "question": "What is the valid priority range for custom network security group rules?",
    "options": ["100-4096", "1-100", "0-65535"],
    "answer": "100-4096"
  },
  {
    "question": "Which tool lets you move resources between resource groups without downtime for most resource types?",
    "options": ["Azure Resource Mover", "Move operation in Azure Resource Manager", "Azure Site Recovery"],
    "answer": "Move operation in Azure Resource Manager"
  }
]
"#;
