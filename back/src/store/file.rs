use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tally_api::v1::{Title, Todo, TodoId, TodoPatch};
use tokio::{sync::Mutex, task};
use tracing::{debug, info};

use super::{Collection, StoreResult, TodoStore};

/// Todos persisted as a RON document. A failed write leaves both the file and
/// the in-memory state as they were.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    todos: Mutex<Collection>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let todos = match fs::File::open(&path) {
            Ok(file) => match ron::de::from_reader::<_, DataOwned>(file)? {
                DataOwned::V1 { todos } => Collection::from_vec(todos),
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "data file not found, starting empty");
                Collection::default()
            }
            Err(err) => return Err(err.into()),
        };

        // an unwritable location fails at startup, not on the first request
        write(&path, &todos)?;

        info!(
            path = %path.display(),
            todos = todos.as_slice().len(),
            "opened data file"
        );

        Ok(Self {
            path,
            todos: Mutex::new(todos),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Collection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut todos = self.todos.lock().await;

        let mut next = todos.clone();
        let output = f(&mut next)?;

        let path = self.path.clone();
        *todos = task::spawn_blocking(move || write(&path, &next).map(|()| next))
            .await
            .map_err(io::Error::other)??;

        Ok(output)
    }
}

impl TodoStore for FileStore {
    async fn insert(&self, title: Title) -> StoreResult<Todo> {
        self.mutate(|todos| Ok(todos.insert(title))).await
    }

    async fn find(&self, id: TodoId) -> StoreResult<Todo> {
        self.todos.lock().await.find(id)
    }

    async fn find_all(&self) -> StoreResult<Vec<Todo>> {
        Ok(self.todos.lock().await.newest_first())
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> StoreResult<Todo> {
        self.mutate(|todos| todos.update(id, patch)).await
    }

    async fn delete(&self, id: TodoId) -> StoreResult<Todo> {
        self.mutate(|todos| todos.remove(id)).await
    }
}

fn write(path: &Path, todos: &Collection) -> StoreResult<()> {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    let data = DataBorrowed::V1 {
        todos: todos.as_slice(),
    };

    let file = fs::File::create(&temp)?;
    let mut serializer = ron::Serializer::new(file, Some(Default::default()))?;
    data.serialize(&mut serializer)?;
    drop(serializer);

    fs::rename(&temp, path)?;

    debug!(path = %path.display(), "wrote data file");

    Ok(())
}

#[derive(Serialize)]
enum DataBorrowed<'a> {
    V1 { todos: &'a [Todo] },
}

#[derive(Deserialize)]
enum DataOwned {
    V1 { todos: Vec<Todo> },
}
